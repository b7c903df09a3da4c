use std::fmt::{Debug, Display};

// dense grid of end-column indexes; -1 marks "no column yet".
#[derive(Clone, PartialEq, Eq)]
pub struct IndexMatrix {
    nrows: usize,
    ncols: usize,
    data: Vec<isize>,
}

impl IndexMatrix {
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            data: vec![-1; nrows * ncols],
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn set(&mut self, row: usize, col: usize, value: isize) {
        assert!(row < self.nrows && col < self.ncols);
        self.data[row * self.ncols + col] = value;
    }

    pub fn get(&self, row: usize, col: usize) -> isize {
        assert!(row < self.nrows && col < self.ncols);
        self.data[row * self.ncols + col]
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, isize)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(k, &v)| (k / self.ncols, k % self.ncols, v))
    }

    pub fn row(&self, row: usize) -> &[isize] {
        assert!(row < self.nrows);
        &self.data[row * self.ncols..(row + 1) * self.ncols]
    }
}

impl Display for IndexMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.nrows {
            writeln!(f, "{:?}", self.row(i))?;
        }
        Ok(())
    }
}

impl Debug for IndexMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
