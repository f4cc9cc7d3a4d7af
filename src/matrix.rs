use crate::{
    error::{MatrixError, Result},
    shape::Shape,
};
use core::{
    fmt::{self, Display, Formatter},
    ops::{Add, Index, Mul, Neg, Sub},
};
use itertools::izip;
use num_traits::Zero;

/// Immutable dense matrix in row-major storage.
///
/// Every operation returns a newly constructed matrix and leaves its
/// operands untouched. There is no mutating API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    columns: usize,
    data: Vec<T>,
}

impl<T: Clone + Zero> Matrix<T> {
    pub fn zeros(rows: usize, columns: usize) -> Self {
        let columns = if rows == 0 { 0 } else { columns };
        Self {
            rows,
            columns,
            data: vec![T::zero(); rows * columns],
        }
    }

    /// Copies `grid` into owned storage.
    ///
    /// The column count is taken from the first row. Rows are not required
    /// to have equal lengths: shorter rows are padded with zeros, excess
    /// elements of longer rows are ignored. An empty grid yields the 0x0
    /// matrix. Never fails.
    pub fn from_rows<R: AsRef<[T]>>(grid: &[R]) -> Self {
        let rows = grid.len();
        let columns = grid.first().map_or(0, |row| row.as_ref().len());
        let mut out = Self::zeros(rows, columns);
        if columns > 0 {
            for (dst, src) in izip!(out.data.chunks_mut(columns), grid) {
                let src = src.as_ref();
                let len = src.len().min(columns);
                dst[..len].clone_from_slice(&src[..len]);
            }
        }
        out
    }
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.columns)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the element at `(row, column)`, or
    /// [`MatrixError::IndexOutOfRange`] when either coordinate is outside
    /// the matrix.
    pub fn get(&self, row: usize, column: usize) -> Result<&T> {
        if self.shape().contains(row, column) {
            Ok(&self.data[row * self.columns + column])
        } else {
            Err(MatrixError::IndexOutOfRange {
                row,
                column,
                shape: self.shape(),
            })
        }
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = &T> {
        self.data[row * self.columns..(row + 1) * self.columns].iter()
    }

    pub fn column(&self, column: usize) -> impl Iterator<Item = &T> {
        self.data[column..].iter().step_by(self.columns)
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |row| &self.data[row * self.columns..(row + 1) * self.columns])
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(&T, &T) -> T) -> Result<Self> {
        if self.shape() != rhs.shape() {
            return Err(MatrixError::DimensionMismatch {
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        let data = izip!(&self.data, &rhs.data).map(|(lhs, rhs)| f(lhs, rhs)).collect();
        Ok(Self {
            rows: self.rows,
            columns: self.columns,
            data,
        })
    }
}

impl<T> Matrix<T>
where
    for<'t> &'t T: Mul<&'t T, Output = T>,
{
    /// Returns this matrix scaled by `scalar`.
    pub fn scale(&self, scalar: &T) -> Self {
        Self {
            rows: self.rows,
            columns: self.columns,
            data: self.data.iter().map(|v| v * scalar).collect(),
        }
    }
}

impl<T> Matrix<T>
where
    for<'t> &'t T: Add<&'t T, Output = T>,
{
    /// Element-wise sum. Requires both dimensions to match.
    pub fn plus(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |lhs, rhs| lhs + rhs)
    }
}

impl<T> Matrix<T>
where
    for<'t> &'t T: Sub<&'t T, Output = T>,
{
    /// Element-wise difference. Requires both dimensions to match.
    pub fn minus(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |lhs, rhs| lhs - rhs)
    }
}

impl<T> Matrix<T>
where
    T: Zero,
    for<'t> &'t T: Mul<&'t T, Output = T>,
{
    /// Matrix product. Requires `self.columns() == rhs.rows()`; the result
    /// is `self.rows() x rhs.columns()`.
    pub fn multiply(&self, rhs: &Self) -> Result<Self> {
        if self.columns != rhs.rows {
            return Err(MatrixError::DimensionMismatch {
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        let data: Vec<T> = (0..self.rows)
            .flat_map(|i| (0..rhs.columns).map(move |j| dot::<T, _, _>(self.row(i), rhs.column(j))))
            .collect();
        Ok(Self {
            rows: self.rows,
            columns: rhs.columns,
            data,
        })
    }
}

fn dot<'a, T, L, R>(lhs: L, rhs: R) -> T
where
    T: 'a + Zero,
    L: Iterator<Item = &'a T>,
    R: Iterator<Item = &'a T>,
    for<'t> &'t T: Mul<&'t T, Output = T>,
{
    izip!(lhs, rhs).fold(T::zero(), |acc, (lhs, rhs)| acc + lhs * rhs)
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &T {
        match self.get(row, column) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.rows_iter().try_for_each(|row| {
            if let Some((first, rest)) = row.split_first() {
                write!(f, "{first}")?;
                rest.iter().try_for_each(|value| write!(f, " {value}"))?;
            }
            writeln!(f)
        })
    }
}

// Operator sugar over the checked methods. The operators panic on shape
// mismatch; callers that want an error use `plus`/`minus`/`multiply`.
macro_rules! impl_checked_op {
    (@ impl $trait:ident<$rhs:ty> for $lhs:ty; $checked:ident; $rhs_ref:expr; ($($bound:tt)*)) => {
        paste::paste! {
            impl<T> core::ops::$trait<$rhs> for $lhs
            where
                $($bound)*
            {
                type Output = Matrix<T>;

                fn [<$trait:lower>](self, rhs: $rhs) -> Matrix<T> {
                    match self.$checked($rhs_ref(&rhs)) {
                        Ok(out) => out,
                        Err(err) => panic!("{err}"),
                    }
                }
            }
        }
    };
    ($(impl $trait:ident for Matrix via $checked:ident where ($($bound:tt)*)),* $(,)?) => {
        $(
            impl_checked_op!(@ impl $trait<Matrix<T>> for Matrix<T>; $checked; core::convert::identity; ($($bound)*));
            impl_checked_op!(@ impl $trait<&Matrix<T>> for Matrix<T>; $checked; core::ops::Deref::deref; ($($bound)*));
            impl_checked_op!(@ impl $trait<Matrix<T>> for &Matrix<T>; $checked; core::convert::identity; ($($bound)*));
            impl_checked_op!(@ impl $trait<&Matrix<T>> for &Matrix<T>; $checked; core::ops::Deref::deref; ($($bound)*));
        )*
    };
}

macro_rules! impl_mul_scalar {
    (@ impl Mul<$rhs:ty> for $lhs:ty; $rhs_ref:expr) => {
        impl<T> core::ops::Mul<$rhs> for $lhs
        where
            for<'t> &'t T: core::ops::Mul<&'t T, Output = T>,
        {
            type Output = Matrix<T>;

            fn mul(self, rhs: $rhs) -> Matrix<T> {
                self.scale($rhs_ref(&rhs))
            }
        }
    };
    ($(impl Mul<scalar> for $lhs:ty),* $(,)?) => {
        $(
            impl_mul_scalar!(@ impl Mul<T> for $lhs; core::convert::identity);
            impl_mul_scalar!(@ impl Mul<&T> for $lhs; core::ops::Deref::deref);
        )*
    };
}

impl_checked_op!(
    impl Add for Matrix via plus
        where (for<'t> &'t T: core::ops::Add<&'t T, Output = T>),
    impl Sub for Matrix via minus
        where (for<'t> &'t T: core::ops::Sub<&'t T, Output = T>),
    impl Mul for Matrix via multiply
        where (T: num_traits::Zero, for<'t> &'t T: core::ops::Mul<&'t T, Output = T>),
);

impl_mul_scalar!(
    impl Mul<scalar> for Matrix<T>,
    impl Mul<scalar> for &Matrix<T>,
);

impl<T> Neg for &Matrix<T>
where
    for<'t> &'t T: Neg<Output = T>,
{
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        Matrix {
            rows: self.rows,
            columns: self.columns,
            data: self.data.iter().map(|value| -value).collect(),
        }
    }
}

impl<T> Neg for Matrix<T>
where
    for<'t> &'t T: Neg<Output = T>,
{
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        -&self
    }
}
