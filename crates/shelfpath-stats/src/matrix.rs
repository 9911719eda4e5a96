use std::borrow::Borrow;

use serde::Serialize;

/// A dense square matrix whose rows and columns are indexed by the same labels.
///
/// Row `i` and column `i` both correspond to `labels[i]`. Only the labels the
/// matrix was created with have cells; there is no implicit catch-all row.
///
/// Matrices are only built through [`LabeledMatrix::filled`] and derived from
/// existing ones, so every row holds one cell per label. Serializes as
/// `{ "labels": [...], "rows": [[...], ...] }`; there is no deserialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledMatrix<L, T> {
    labels: Vec<L>,
    rows: Vec<Vec<T>>,
}

impl<L, T> LabeledMatrix<L, T> {
    /// Creates a matrix over `labels` with every cell set to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use shelfpath_stats::matrix::LabeledMatrix;
    /// let matrix = LabeledMatrix::filled(vec!["a", "b", "c"], 0_u64);
    /// assert_eq!(matrix.len(), 3);
    /// assert_eq!(matrix.get(&"a", &"c"), Some(&0));
    /// assert_eq!(matrix.get(&"a", &"z"), None);
    /// ```
    #[must_use]
    pub fn filled(labels: Vec<L>, value: T) -> Self
    where
        T: Clone,
    {
        let n = labels.len();
        Self {
            labels,
            rows: vec![vec![value; n]; n],
        }
    }

    /// Returns the labels in row/column order.
    #[must_use]
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Returns the number of rows (equal to the number of columns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the matrix has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the row/column index of `label`.
    pub fn position<Q>(&self, label: &Q) -> Option<usize>
    where
        L: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.labels.iter().position(|l| l.borrow() == label)
    }

    /// Returns the cell at row `from` and column `to`, looked up by label.
    pub fn get<Q>(&self, from: &Q, to: &Q) -> Option<&T>
    where
        L: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let i = self.position(from)?;
        let j = self.position(to)?;
        Some(&self.rows[i][j])
    }

    /// Returns the row for `label`.
    pub fn row<Q>(&self, label: &Q) -> Option<&[T]>
    where
        L: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let i = self.position(label)?;
        Some(&self.rows[i])
    }

    /// Returns the cell at index `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn cell(&self, i: usize, j: usize) -> &T {
        &self.rows[i][j]
    }

    /// Returns a mutable reference to the cell at index `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn cell_mut(&mut self, i: usize, j: usize) -> &mut T {
        &mut self.rows[i][j]
    }

    /// Iterates over `(label, row)` in label order.
    pub fn rows(&self) -> impl Iterator<Item = (&L, &[T])> {
        self.labels
            .iter()
            .zip(&self.rows)
            .map(|(label, row)| (label, row.as_slice()))
    }
}

impl<L> LabeledMatrix<L, u64> {
    /// Returns the sum of each row, in label order.
    #[must_use]
    pub fn row_totals(&self) -> Vec<u64> {
        self.rows.iter().map(|row| row.iter().sum()).collect()
    }

    /// Divides every cell by its row total.
    ///
    /// Rows whose total is zero stay all zero instead of producing `NaN`, so
    /// every row of the result sums to either 1.0 (within floating-point
    /// tolerance) or exactly 0.0.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn row_normalized(&self) -> LabeledMatrix<L, f64>
    where
        L: Clone,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let total = row.iter().sum::<u64>();
                if total == 0 {
                    vec![0.0; row.len()]
                } else {
                    row.iter()
                        .map(|&count| count as f64 / total as f64)
                        .collect()
                }
            })
            .collect();
        LabeledMatrix {
            labels: self.labels.clone(),
            rows,
        }
    }
}
