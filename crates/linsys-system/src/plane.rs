use std::fmt;

use linsys_vector::scalar::{self, DEFAULT_TOLERANCE};
use linsys_vector::Vector;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LinearSystemError;

/// Decimal places kept when rendering coefficients.
const DISPLAY_DECIMAL_PLACES: u32 = 3;

/// An affine hyperplane `normal_vector · x = constant_term`.
///
/// The default plane has a one dimensional zero normal vector and a zero constant term. It
/// stands for a row that carries no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plane {
    normal_vector: Vector,
    constant_term: Decimal,
}

impl Plane {
    /// Create a new plane from its normal vector and constant term.
    ///
    /// Example:
    ///
    /// ```
    /// use linsys_system::Plane;
    /// use linsys_vector::{Decimal, Vector};
    ///
    /// // x + y - 2z = 4
    /// let normal = Vector::parse(&["1", "1", "-2"]).unwrap();
    /// let plane = Plane::new(normal, Decimal::from(4));
    /// assert_eq!(plane.to_string(), "x_1 + x_2 - 2x_3 = 4");
    /// ```
    pub fn new(normal_vector: Vector, constant_term: Decimal) -> Self {
        Self {
            normal_vector,
            constant_term,
        }
    }

    /// Create a plane with a zero normal vector and the given constant term.
    ///
    /// A nonzero constant term is the signature of an inconsistent equation `0 = k`.
    pub fn with_constant_term(constant_term: Decimal) -> Self {
        Self {
            normal_vector: Vector::default(),
            constant_term,
        }
    }

    /// The coefficients of the equation.
    #[inline]
    pub fn normal_vector(&self) -> &Vector {
        &self.normal_vector
    }

    /// The right hand side of the equation.
    #[inline]
    pub fn constant_term(&self) -> Decimal {
        self.constant_term
    }

    /// The number of variables of the equation.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.normal_vector.dimension()
    }

    /// Index of the first coefficient whose magnitude is not near zero.
    ///
    /// # Returns
    ///
    /// The index, or [`LinearSystemError::NoNonzeroElements`] if every coefficient is below
    /// the default tolerance.
    pub fn first_nonzero_index(coefficients: &[Decimal]) -> Result<usize, LinearSystemError> {
        coefficients
            .iter()
            .position(|&c| !scalar::is_near_zero(c, DEFAULT_TOLERANCE))
            .ok_or(LinearSystemError::NoNonzeroElements)
    }

    /// A point lying on the plane, on the axis of its first nonzero coefficient.
    ///
    /// Planes with a zero normal vector have no basepoint. Fails if the coordinate of the
    /// basepoint leaves the decimal range.
    pub fn basepoint(&self) -> Result<Option<Vector>, LinearSystemError> {
        let Ok(index) = Self::first_nonzero_index(self.normal_vector.coordinates()) else {
            return Ok(None);
        };
        let mut coordinates = vec![Decimal::ZERO; self.dimension()];
        coordinates[index] = scalar::div(self.constant_term, self.normal_vector[index])?;
        Ok(Some(Vector::new(coordinates)?))
    }

    /// Check whether the normal vectors of two planes are parallel.
    pub fn is_parallel_to(&self, other: &Plane) -> Result<bool, LinearSystemError> {
        Ok(self.normal_vector.is_parallel_to(&other.normal_vector)?)
    }

    /// Check whether two planes describe the same set of points.
    ///
    /// Unlike `==`, which compares coefficients, `2x = 2` coincides with `x = 1`.
    pub fn is_coincident_with(&self, other: &Plane) -> Result<bool, LinearSystemError> {
        match (self.normal_vector.is_zero(), other.normal_vector.is_zero()) {
            (true, true) => {
                let diff = scalar::sub(self.constant_term, other.constant_term)?;
                return Ok(scalar::is_near_zero(diff, DEFAULT_TOLERANCE));
            }
            (true, false) | (false, true) => return Ok(false),
            (false, false) => {}
        }

        if !self.is_parallel_to(other)? {
            return Ok(false);
        }

        let (Some(x0), Some(y0)) = (self.basepoint()?, other.basepoint()?) else {
            return Ok(false);
        };
        let basepoint_difference = y0.minus(&x0)?;
        Ok(basepoint_difference.is_orthogonal_to(&self.normal_vector)?)
    }

    /// The plane with both sides of the equation multiplied by `coefficient`.
    pub fn scaled(&self, coefficient: Decimal) -> Result<Plane, LinearSystemError> {
        Ok(Plane {
            normal_vector: self.normal_vector.times_scalar(coefficient)?,
            constant_term: scalar::mul(coefficient, self.constant_term)?,
        })
    }

    /// The plane `coefficient * other + self`.
    pub fn plus_multiple_of(
        &self,
        coefficient: Decimal,
        other: &Plane,
    ) -> Result<Plane, LinearSystemError> {
        let normal_vector = other
            .normal_vector
            .times_scalar(coefficient)?
            .plus(&self.normal_vector)?;
        let constant_term = scalar::add(
            scalar::mul(coefficient, other.constant_term)?,
            self.constant_term,
        )?;
        Ok(Plane {
            normal_vector,
            constant_term,
        })
    }

    fn has_zero_normal(&self) -> bool {
        self.normal_vector.iter().all(Decimal::is_zero)
    }
}

/// Planes are equal when their coefficients and constant terms are equal.
///
/// Planes whose normal vectors are exactly zero only compare their constant terms, so the
/// default plane equals a reduced row `0x_1 + 0x_2 + 0x_3 = 0` of any dimension.
impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        if self.has_zero_normal() && other.has_zero_normal() {
            return self.constant_term == other.constant_term;
        }
        self.normal_vector == other.normal_vector && self.constant_term == other.constant_term
    }
}

fn display_rounded(value: Decimal) -> Decimal {
    value.round_dp(DISPLAY_DECIMAL_PLACES).normalize()
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms = self
            .normal_vector
            .iter()
            .map(|&c| display_rounded(c))
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .peekable();

        if terms.peek().is_none() {
            write!(f, "0")?;
        }

        for (position, (index, c)) in terms.enumerate() {
            match (position, c.is_sign_negative()) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            let magnitude = c.abs();
            if magnitude != Decimal::ONE {
                write!(f, "{magnitude}")?;
            }
            write!(f, "x_{}", index + 1)?;
        }

        write!(f, " = {}", display_rounded(self.constant_term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linsys_vector::VectorError;

    fn plane(normal: &[&str], constant: &str) -> Plane {
        Plane::new(
            Vector::parse(normal).unwrap(),
            scalar::parse(constant).unwrap(),
        )
    }

    #[test]
    fn test_default_plane() {
        let p = Plane::default();
        assert_eq!(p.dimension(), 1);
        assert_eq!(p.constant_term(), Decimal::ZERO);
        assert_eq!(p, plane(&["0", "0", "0"], "0"));
        assert_ne!(p, plane(&["0", "0", "0"], "1"));
        assert_eq!(Plane::with_constant_term(Decimal::ONE), plane(&["0", "0"], "1"));
    }

    #[test]
    fn test_equality() {
        assert_eq!(plane(&["1", "1"], "1"), plane(&["1.0", "1"], "1.00"));
        assert_ne!(plane(&["1", "1"], "1"), plane(&["2", "2"], "2"));
        assert_ne!(plane(&["1", "1"], "1"), plane(&["1", "1", "0"], "1"));
        assert_ne!(plane(&["1", "0"], "0"), Plane::default());
    }

    #[test]
    fn test_first_nonzero_index() {
        let p = plane(&["0", "1e-11", "-3", "1"], "0");
        assert_eq!(
            Plane::first_nonzero_index(p.normal_vector().coordinates()),
            Ok(2)
        );
        let zero = plane(&["0", "1e-12"], "4");
        assert_eq!(
            Plane::first_nonzero_index(zero.normal_vector().coordinates()),
            Err(LinearSystemError::NoNonzeroElements)
        );
    }

    #[test]
    fn test_basepoint() -> Result<(), LinearSystemError> {
        let p = plane(&["0", "2", "1"], "3");
        assert_eq!(p.basepoint()?, Some(Vector::parse(&["0", "1.5", "0"]).unwrap()));
        assert_eq!(Plane::with_constant_term(Decimal::TWO).basepoint()?, None);

        let steep = plane(&["1e-9", "1"], "1e20");
        assert_eq!(
            steep.basepoint(),
            Err(LinearSystemError::Vector(VectorError::Overflow))
        );
        Ok(())
    }

    #[test]
    fn test_parallel_and_coincident() -> Result<(), LinearSystemError> {
        let p1 = plane(&["-0.412", "3.806", "0.728"], "-3.46");
        let p2 = plane(&["1.03", "-9.515", "-1.82"], "8.65");
        assert!(p1.is_parallel_to(&p2)?);
        assert!(p1.is_coincident_with(&p2)?);

        let p1 = plane(&["2.611", "5.528", "0.283"], "4.6");
        let p2 = plane(&["7.715", "8.306", "5.342"], "3.76");
        assert!(!p1.is_parallel_to(&p2)?);
        assert!(!p1.is_coincident_with(&p2)?);

        let p1 = plane(&["-7.926", "8.625", "-7.212"], "-7.952");
        let p2 = plane(&["-2.642", "2.875", "-2.404"], "-2.443");
        assert!(p1.is_parallel_to(&p2)?);
        assert!(!p1.is_coincident_with(&p2)?);

        assert!(plane(&["2", "0"], "2").is_coincident_with(&plane(&["1", "0"], "1"))?);
        assert!(Plane::default().is_coincident_with(&plane(&["0", "0"], "0"))?);
        assert!(!Plane::default().is_coincident_with(&plane(&["1", "0"], "0"))?);
        Ok(())
    }

    #[test]
    fn test_coincident_dimension_mismatch() {
        let p1 = plane(&["1", "1"], "1");
        let p2 = plane(&["1", "1", "1"], "1");
        assert!(matches!(
            p1.is_coincident_with(&p2),
            Err(LinearSystemError::Vector(_))
        ));
    }

    #[test]
    fn test_scaled_and_combined() -> Result<(), LinearSystemError> {
        let p1 = plane(&["1", "1", "1"], "1");
        let p2 = plane(&["0", "1", "0"], "2");
        assert_eq!(p1.scaled(Decimal::TEN)?, plane(&["10", "10", "10"], "10"));
        assert_eq!(
            p2.plus_multiple_of(Decimal::NEGATIVE_ONE, &p1)?,
            plane(&["-1", "0", "-1"], "1")
        );
        Ok(())
    }

    #[test]
    fn test_scaled_and_combined_overflow() {
        let p = plane(&["1e20", "1"], "1");
        let k = Decimal::from_scientific("1e10").unwrap();
        let overflow = Err(LinearSystemError::Vector(VectorError::Overflow));
        assert_eq!(p.scaled(k), overflow);
        assert_eq!(p.plus_multiple_of(k, &p), overflow);

        let q = plane(&["1", "1"], "1e20");
        assert_eq!(q.scaled(k), overflow);
    }

    #[test]
    fn test_display() {
        assert_eq!(plane(&["1", "1", "1"], "1").to_string(), "x_1 + x_2 + x_3 = 1");
        assert_eq!(plane(&["0", "0", "-2"], "2").to_string(), "-2x_3 = 2");
        assert_eq!(
            plane(&["1.5", "-1", "0.33333"], "-2.0").to_string(),
            "1.5x_1 - x_2 + 0.333x_3 = -2"
        );
        assert_eq!(plane(&["0", "0"], "1").to_string(), "0 = 1");
        assert_eq!(Plane::default().to_string(), "0 = 0");
    }
}
