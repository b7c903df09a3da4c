use crate::error::BiplexError;

// the real-valued grade scales behind the discrete grid, used to map a
// user-facing relative offset onto the feasible offset interval.
#[derive(Debug, Clone, Default)]
pub struct GradeScale {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl GradeScale {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert!(x.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(y.windows(2).all(|w| w[0] < w[1]));
        Self { x, y }
    }

    pub fn x_values(&self) -> &[f64] {
        &self.x
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y
    }

    pub fn min_offset(&self) -> f64 {
        match (self.x.last(), self.y.first()) {
            (Some(&xl), Some(&yf)) => f64::max(-xl, yf),
            _ => 0.0,
        }
    }

    pub fn max_offset(&self) -> f64 {
        match (self.x.first(), self.y.last()) {
            (Some(&xf), Some(&yl)) => f64::max(yl, -xf),
            _ => 0.0,
        }
    }

    pub fn relative_offset_to_absolute(&self, offset: f64) -> Result<f64, BiplexError> {
        if !(0.0..=1.0).contains(&offset) {
            return Err(BiplexError::BadOffset(offset));
        }
        let min = self.min_offset();
        let diff = self.max_offset() - min;
        Ok(min + diff * offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GradeScale {
        GradeScale::new(vec![1.0, 3.0], vec![-2.0, 0.0])
    }

    #[test]
    fn offsets() {
        let s = sample();
        assert_eq!(s.min_offset(), -2.0);
        assert_eq!(s.max_offset(), 0.0);
    }

    #[test]
    fn relative_to_absolute() {
        let s = sample();
        assert_eq!(s.relative_offset_to_absolute(0.0).unwrap(), -2.0);
        assert_eq!(s.relative_offset_to_absolute(0.5).unwrap(), -1.0);
        assert_eq!(s.relative_offset_to_absolute(1.0).unwrap(), 0.0);
    }

    #[test]
    fn bad_offset() {
        let s = sample();
        assert_eq!(
            s.relative_offset_to_absolute(1.5),
            Err(BiplexError::BadOffset(1.5))
        );
        assert!(s.relative_offset_to_absolute(-0.1).is_err());
    }

    #[test]
    fn empty_scale() {
        let s = GradeScale::default();
        assert_eq!(s.min_offset(), 0.0);
        assert_eq!(s.max_offset(), 0.0);
        assert_eq!(s.relative_offset_to_absolute(0.7).unwrap(), 0.0);
    }
}
