use std::fmt;
use std::ops::Index;

use linsys_vector::scalar::{self, DEFAULT_TOLERANCE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LinearSystemError;
use crate::plane::Plane;

/// Configuration for the row reduction of a linear system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EliminationConfig {
    /// Coefficients with a magnitude below this value are treated as zero when choosing pivots.
    ///
    /// Must be strictly positive, see [`EliminationConfig::new`].
    pub zero_tolerance: Decimal,
}

impl EliminationConfig {
    /// Create a new configuration with the given pivot tolerance.
    ///
    /// # Returns
    ///
    /// The configuration, or [`LinearSystemError::InvalidTolerance`] if `zero_tolerance` is
    /// zero or negative.
    pub fn new(zero_tolerance: Decimal) -> Result<Self, LinearSystemError> {
        let config = Self { zero_tolerance };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), LinearSystemError> {
        // a zero tolerance would accept exact zeros as pivots
        if self.zero_tolerance <= Decimal::ZERO {
            return Err(LinearSystemError::InvalidTolerance(self.zero_tolerance));
        }
        Ok(())
    }
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self {
            zero_tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// An ordered set of equations sharing the same variables.
///
/// Row order is significant: row `i` is equation `i`. Every plane lives in the dimension of
/// the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Plane>", into = "Vec<Plane>")]
pub struct LinearSystem {
    planes: Vec<Plane>,
    dimension: usize,
}

impl LinearSystem {
    /// Create a new linear system from its equations.
    ///
    /// # Arguments
    ///
    /// * `planes` - The equations of the system, in row order.
    ///
    /// # Returns
    ///
    /// The system, [`LinearSystemError::EmptySystem`] if no plane is given, or
    /// [`LinearSystemError::DimensionMismatch`] if the planes differ in dimension.
    pub fn new(planes: Vec<Plane>) -> Result<Self, LinearSystemError> {
        let dimension = planes
            .first()
            .ok_or(LinearSystemError::EmptySystem)?
            .dimension();

        if let Some(plane) = planes.iter().find(|p| p.dimension() != dimension) {
            return Err(LinearSystemError::DimensionMismatch {
                expected: dimension,
                found: plane.dimension(),
            });
        }

        Ok(Self { planes, dimension })
    }

    /// The number of equations.
    #[inline]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    /// Whether the system has no equation.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// The number of variables.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The equations, in row order.
    #[inline]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Iterate over the equations in row order.
    pub fn iter(&self) -> impl Iterator<Item = &Plane> {
        self.planes.iter()
    }

    fn check_row(&self, row: usize) -> Result<(), LinearSystemError> {
        if row >= self.len() {
            return Err(LinearSystemError::RowOutOfBounds {
                row,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn coefficient(&self, row: usize, col: usize) -> Decimal {
        self.planes[row].normal_vector()[col]
    }

    /// Replace an equation of the system.
    ///
    /// The new plane must live in the dimension of the system.
    pub fn set_row(&mut self, row: usize, plane: Plane) -> Result<(), LinearSystemError> {
        self.check_row(row)?;
        if plane.dimension() != self.dimension {
            return Err(LinearSystemError::DimensionMismatch {
                expected: self.dimension,
                found: plane.dimension(),
            });
        }
        self.planes[row] = plane;
        Ok(())
    }

    /// Exchange two equations.
    pub fn swap_rows(&mut self, row1: usize, row2: usize) -> Result<(), LinearSystemError> {
        self.check_row(row1)?;
        self.check_row(row2)?;
        self.planes.swap(row1, row2);
        Ok(())
    }

    /// Multiply both sides of an equation by `coefficient`.
    ///
    /// A zero coefficient is accepted and turns the row into `0 = 0`.
    pub fn multiply_coefficient_and_row(
        &mut self,
        coefficient: Decimal,
        row: usize,
    ) -> Result<(), LinearSystemError> {
        self.check_row(row)?;
        let scaled = self.planes[row].scaled(coefficient)?;
        self.set_row(row, scaled)
    }

    /// Replace `row_to_be_added_to` with `coefficient * row_to_add + row_to_be_added_to`.
    pub fn add_multiple_times_row_to_row(
        &mut self,
        coefficient: Decimal,
        row_to_add: usize,
        row_to_be_added_to: usize,
    ) -> Result<(), LinearSystemError> {
        self.check_row(row_to_add)?;
        self.check_row(row_to_be_added_to)?;
        let combined = self.planes[row_to_be_added_to]
            .plus_multiple_of(coefficient, &self.planes[row_to_add])?;
        self.set_row(row_to_be_added_to, combined)
    }

    /// Column of the first non near-zero coefficient of every equation.
    ///
    /// # Returns
    ///
    /// One entry per row, `None` when the normal vector of the row is entirely near zero.
    pub fn indices_of_first_nonzero_terms_in_each_row(
        &self,
    ) -> Result<Vec<Option<usize>>, LinearSystemError> {
        self.planes
            .iter()
            .map(
                |p| match Plane::first_nonzero_index(p.normal_vector().coordinates()) {
                    Ok(index) => Ok(Some(index)),
                    Err(LinearSystemError::NoNonzeroElements) => Ok(None),
                    Err(err) => Err(err),
                },
            )
            .collect()
    }

    /// Reduce a copy of the system to row-echelon form with the default configuration.
    ///
    /// Example:
    ///
    /// ```
    /// use linsys_system::{LinearSystem, Plane};
    /// use linsys_vector::{Decimal, Vector};
    ///
    /// let p1 = Plane::new(Vector::parse(&["0", "1", "1"]).unwrap(), Decimal::ONE);
    /// let p2 = Plane::new(Vector::parse(&["1", "-1", "1"]).unwrap(), Decimal::TWO);
    /// let system = LinearSystem::new(vec![p1.clone(), p2.clone()]).unwrap();
    ///
    /// let triangular = system.compute_triangular_form().unwrap();
    /// assert_eq!(triangular[0], p2);
    /// assert_eq!(triangular[1], p1);
    /// // the input is left untouched
    /// assert_eq!(system[0], p1);
    /// ```
    pub fn compute_triangular_form(&self) -> Result<LinearSystem, LinearSystemError> {
        self.compute_triangular_form_with(&EliminationConfig::default())
    }

    /// Reduce a copy of the system to row-echelon form.
    ///
    /// The column cursor is shared by all rows: once a column has been passed it is never
    /// revisited. A row without a usable pivot in the current column is swapped with the
    /// first row below that has one; when there is none the cursor moves to the next column
    /// and the same row is tried again. Rows left without any pivot end up at the bottom.
    ///
    /// # Arguments
    ///
    /// * `config` - The elimination configuration.
    ///
    /// # Returns
    ///
    /// The reduced system. The original system is never modified. Fails with
    /// [`LinearSystemError::InvalidTolerance`] for a tolerance that is not strictly positive,
    /// and with [`VectorError::Overflow`](linsys_vector::VectorError::Overflow) when an
    /// elimination step leaves the decimal range.
    pub fn compute_triangular_form_with(
        &self,
        config: &EliminationConfig,
    ) -> Result<LinearSystem, LinearSystemError> {
        config.validate()?;
        let mut system = self.clone();

        let num_equations = system.len();
        let num_variables = system.dimension();

        let mut col = 0;
        for row in 0..num_equations {
            while col < num_variables {
                let c = system.coefficient(row, col);
                if scalar::is_near_zero(c, config.zero_tolerance)
                    && !system.swap_with_row_below_for_nonzero_coefficient(row, col, config)?
                {
                    log::trace!("no pivot for row {row} in column {col}");
                    col += 1;
                    continue;
                }
                system.clear_coefficients_below(row, col)?;
                col += 1;
                break;
            }
        }

        Ok(system)
    }

    fn swap_with_row_below_for_nonzero_coefficient(
        &mut self,
        row: usize,
        col: usize,
        config: &EliminationConfig,
    ) -> Result<bool, LinearSystemError> {
        let below = (row + 1..self.len())
            .find(|&k| !scalar::is_near_zero(self.coefficient(k, col), config.zero_tolerance));

        match below {
            Some(k) => {
                log::debug!("swapping rows {row} and {k} for a pivot in column {col}");
                self.swap_rows(row, k)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear_coefficients_below(&mut self, row: usize, col: usize) -> Result<(), LinearSystemError> {
        let beta = self.coefficient(row, col);
        log::debug!("clearing column {col} below row {row} with pivot {beta}");

        for k in row + 1..self.len() {
            let gamma = self.coefficient(k, col);
            let alpha = -scalar::div(gamma, beta)?;
            self.add_multiple_times_row_to_row(alpha, row, k)?;
        }

        Ok(())
    }
}

impl Index<usize> for LinearSystem {
    type Output = Plane;

    fn index(&self, index: usize) -> &Self::Output {
        &self.planes[index]
    }
}

impl TryFrom<Vec<Plane>> for LinearSystem {
    type Error = LinearSystemError;

    fn try_from(planes: Vec<Plane>) -> Result<Self, Self::Error> {
        Self::new(planes)
    }
}

impl From<LinearSystem> for Vec<Plane> {
    fn from(system: LinearSystem) -> Self {
        system.planes
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Linear System:")?;
        for (i, p) in self.planes.iter().enumerate() {
            write!(f, "\nEquation {}: {p}", i + 1)?;
        }
        Ok(())
    }
}
