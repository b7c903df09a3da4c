use std::collections::BTreeSet;
use std::fmt::{Debug, Display};

use delegate::delegate;
use num_traits::One;
use sprs::{CsMat, TriMat};

use crate::F2;

// the set-a-cell primitive shared by all mod-2 matrix variants; the
// boundary-column writers are generic over it.
pub trait SetEntry {
    fn set(&mut self, row: usize, col: usize);
}

#[derive(Clone, PartialEq, Eq)]
pub struct MapMatrix {
    nrows: usize,
    cols: Vec<BTreeSet<usize>>,
}

impl MapMatrix {
    pub fn zero(shape: (usize, usize)) -> Self {
        let (nrows, ncols) = shape;
        Self {
            nrows,
            cols: vec![BTreeSet::new(); ncols],
        }
    }

    pub fn from_entries<T>(shape: (usize, usize), entries: T) -> Self
    where T: IntoIterator<Item = (usize, usize)> {
        let mut mat = Self::zero(shape);
        for (i, j) in entries {
            mat.set(i, j);
        }
        mat
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.cols.len())
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.cols.len()
    }

    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.cols[col].contains(&row)
    }

    pub fn col(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        self.cols[col].iter().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cols
            .iter()
            .enumerate()
            .flat_map(|(j, rows)| rows.iter().map(move |&i| (i, j)))
    }

    pub fn nnz(&self) -> usize {
        self.cols.iter().map(|c| c.len()).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.cols.iter().all(|c| c.is_empty())
    }

    pub fn to_cs_mat(&self) -> CsMat<F2> {
        let mut trip = TriMat::new(self.shape());
        for (i, j) in self.iter() {
            trip.add_triplet(i, j, F2::one());
        }
        trip.to_csc()
    }
}

impl SetEntry for MapMatrix {
    fn set(&mut self, row: usize, col: usize) {
        assert!(row < self.nrows);
        self.cols[col].insert(row);
    }
}

impl Display for MapMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.nrows {
            for j in 0..self.ncols() {
                write!(f, "{}", u8::from(self.is_set(i, j)))?;
                if j + 1 < self.ncols() {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for MapMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

// same capability as MapMatrix, but a distinct type so that matrices with
// externally permuted rows/columns cannot be mixed up with plain ones.
#[derive(Clone, PartialEq, Eq)]
pub struct PermMapMatrix {
    inner: MapMatrix,
}

impl PermMapMatrix {
    pub fn zero(shape: (usize, usize)) -> Self {
        Self {
            inner: MapMatrix::zero(shape),
        }
    }

    pub fn inner(&self) -> &MapMatrix {
        &self.inner
    }

    pub fn into_inner(self) -> MapMatrix {
        self.inner
    }

    delegate! {
        to self.inner {
            pub fn shape(&self) -> (usize, usize);
            pub fn nrows(&self) -> usize;
            pub fn ncols(&self) -> usize;
            pub fn is_set(&self, row: usize, col: usize) -> bool;
            pub fn nnz(&self) -> usize;
            pub fn is_zero(&self) -> bool;
            pub fn to_cs_mat(&self) -> CsMat<F2>;
        }
    }
}

impl SetEntry for PermMapMatrix {
    fn set(&mut self, row: usize, col: usize) {
        self.inner.set(row, col);
    }
}

impl Debug for PermMapMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.inner, f)
    }
}
