use thiserror::Error;

use crate::grade::Grade;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BiplexError {
    /// Matrix or index query for a dimension the engine does not track.
    #[error("no boundary or index data for dimension {0}")]
    BadDimension(isize),
    /// A facet required during boundary emission is absent from the tree.
    #[error("facet {0:?} not present in the complex")]
    MissingFacet(Vec<usize>),
    /// A grade lies outside the declared grade grid.
    #[error("grade {grade} outside the {num_x} x {num_y} grade grid")]
    BadGrade {
        grade: Grade,
        num_x: usize,
        num_y: usize,
    },
    /// A relative offset outside the unit interval.
    #[error("relative offset {0} must lie in [0, 1]")]
    BadOffset(f64),
}
