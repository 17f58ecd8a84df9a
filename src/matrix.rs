use std::ops::{Index, IndexMut};

use serde::Serialize;

/// Dense row-major grid backing both the score and the move matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DpMatrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Clone> DpMatrix<T> {
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            data: vec![fill; rows * cols],
            rows,
            cols,
        }
    }
}

impl<T> DpMatrix<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self[(row, col)] = value;
    }

    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.cols.max(1)).take(self.rows)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<(usize, usize)> for DpMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.rows && col < self.cols);
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for DpMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_layout() {
        let mut m = DpMatrix::new(2, 3, 0i64);
        m.set(1, 2, 7);
        m[(0, 1)] = 4;
        assert_eq!(m.as_slice(), &[0, 4, 0, 0, 0, 7]);
        assert_eq!(m.row(1), &[0, 0, 7]);
        assert_eq!(m.dimensions(), (2, 3));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.iter_rows().count(), 2);
    }
}
