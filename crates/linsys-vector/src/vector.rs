use std::fmt;
use std::ops::{Index, Neg};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::VectorError;
use crate::scalar::{self, DEFAULT_TOLERANCE};

/// Unit used to report angles between vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AngleUnit {
    /// Angle in radians.
    #[default]
    Radians,
    /// Angle in degrees.
    Degrees,
}

/// A geometric vector of decimal coordinates.
///
/// The coordinates are never empty. Every operation returns a new vector and rounds its
/// results to [`PRECISION`](crate::scalar::PRECISION) significant digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Decimal>", into = "Vec<Decimal>")]
pub struct Vector {
    coordinates: Vec<Decimal>,
}

impl Vector {
    /// Create a new vector from its coordinates.
    ///
    /// # Arguments
    ///
    /// * `coordinates` - The coordinates of the vector, kept exactly.
    ///
    /// # Returns
    ///
    /// The vector, or [`VectorError::EmptyCoordinates`] if no coordinate is given.
    pub fn new(coordinates: Vec<Decimal>) -> Result<Self, VectorError> {
        if coordinates.is_empty() {
            return Err(VectorError::EmptyCoordinates);
        }
        Ok(Self { coordinates })
    }

    /// Create a new vector by parsing decimal literals.
    ///
    /// Example:
    ///
    /// ```
    /// use linsys_vector::Vector;
    ///
    /// let v = Vector::parse(&["1", "-2.5", "1e-3"]).unwrap();
    /// assert_eq!(v.dimension(), 3);
    /// ```
    pub fn parse<S: AsRef<str>>(literals: &[S]) -> Result<Self, VectorError> {
        let coordinates = literals
            .iter()
            .map(|literal| scalar::parse(literal.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coordinates)
    }

    /// Create a new vector from binary floats.
    pub fn from_f64(values: &[f64]) -> Result<Self, VectorError> {
        let coordinates = values
            .iter()
            .map(|&value| scalar::from_f64(value))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coordinates)
    }

    /// The number of coordinates.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// The coordinates as a slice.
    #[inline]
    pub fn coordinates(&self) -> &[Decimal] {
        &self.coordinates
    }

    /// Iterate over the coordinates.
    pub fn iter(&self) -> impl Iterator<Item = &Decimal> {
        self.coordinates.iter()
    }

    fn check_dimension(&self, other: &Vector) -> Result<(), VectorError> {
        if self.dimension() != other.dimension() {
            return Err(VectorError::DimensionMismatch(
                self.dimension(),
                other.dimension(),
            ));
        }
        Ok(())
    }

    fn zip_with(
        &self,
        other: &Vector,
        op: impl Fn(Decimal, Decimal) -> Result<Decimal, VectorError>,
    ) -> Result<Vector, VectorError> {
        self.check_dimension(other)?;
        let coordinates = self
            .coordinates
            .iter()
            .zip(other.coordinates.iter())
            .map(|(&a, &b)| op(a, b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Vector { coordinates })
    }

    /// Element-wise sum with another vector.
    pub fn plus(&self, other: &Vector) -> Result<Vector, VectorError> {
        self.zip_with(other, scalar::add)
    }

    /// Element-wise difference with another vector.
    pub fn minus(&self, other: &Vector) -> Result<Vector, VectorError> {
        self.zip_with(other, scalar::sub)
    }

    /// Multiply every coordinate by a scalar.
    ///
    /// Fails with [`VectorError::Overflow`] if a product leaves the decimal range.
    pub fn times_scalar(&self, factor: Decimal) -> Result<Vector, VectorError> {
        let coordinates = self
            .coordinates
            .iter()
            .map(|&c| scalar::mul(factor, c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Vector { coordinates })
    }

    /// Euclidean norm of the vector.
    ///
    /// The squared coordinates are summed before the root is taken, so coordinates
    /// around `1e14` and above overflow with [`VectorError::Overflow`].
    pub fn magnitude(&self) -> Result<Decimal, VectorError> {
        let squared = self
            .coordinates
            .iter()
            .try_fold(Decimal::ZERO, |acc, &c| scalar::add(acc, scalar::mul(c, c)?))?;
        Ok(scalar::sqrt(squared))
    }

    /// The unit vector pointing in the same direction.
    ///
    /// # Returns
    ///
    /// The normalized vector, or [`VectorError::CannotNormalizeZeroVector`] if the
    /// magnitude is below the default tolerance.
    pub fn normalized(&self) -> Result<Vector, VectorError> {
        let magnitude = self.magnitude()?;
        if scalar::is_near_zero(magnitude, DEFAULT_TOLERANCE) {
            return Err(VectorError::CannotNormalizeZeroVector);
        }
        self.times_scalar(scalar::div(Decimal::ONE, magnitude)?)
    }

    /// Inner product with another vector.
    pub fn dot(&self, other: &Vector) -> Result<Decimal, VectorError> {
        self.check_dimension(other)?;
        self.coordinates
            .iter()
            .zip(other.coordinates.iter())
            .try_fold(Decimal::ZERO, |acc, (&a, &b)| {
                scalar::add(acc, scalar::mul(a, b)?)
            })
    }

    fn unit_cosine_with(&self, other: &Vector) -> Result<Decimal, VectorError> {
        self.check_dimension(other)?;
        let map_zero = |err| match err {
            VectorError::CannotNormalizeZeroVector => VectorError::AngleWithZeroVector,
            err => err,
        };
        let u1 = self.normalized().map_err(map_zero)?;
        let u2 = other.normalized().map_err(map_zero)?;
        u1.dot(&u2)
    }

    /// Angle between this vector and another one.
    ///
    /// # Arguments
    ///
    /// * `other` - The other vector, with the same dimension.
    /// * `unit` - Whether to report the angle in radians or degrees.
    ///
    /// # Returns
    ///
    /// The angle in `[0, π]` (or `[0, 180]`), or [`VectorError::AngleWithZeroVector`] if
    /// either vector is zero.
    pub fn angle_with(&self, other: &Vector, unit: AngleUnit) -> Result<f64, VectorError> {
        // rounding may push the cosine slightly outside of the acos domain
        let cosine = scalar::to_f64(self.unit_cosine_with(other)?).clamp(-1.0, 1.0);
        let radians = cosine.acos();
        Ok(match unit {
            AngleUnit::Radians => radians,
            AngleUnit::Degrees => radians.to_degrees(),
        })
    }

    /// Check whether the inner product with another vector is below the default tolerance.
    pub fn is_orthogonal_to(&self, other: &Vector) -> Result<bool, VectorError> {
        self.is_orthogonal_to_within(other, DEFAULT_TOLERANCE)
    }

    /// Check whether the inner product with another vector is below `tolerance`.
    pub fn is_orthogonal_to_within(
        &self,
        other: &Vector,
        tolerance: Decimal,
    ) -> Result<bool, VectorError> {
        Ok(scalar::is_near_zero(self.dot(other)?, tolerance))
    }

    /// Check whether two vectors are parallel or anti-parallel.
    ///
    /// The zero vector is parallel to every vector.
    pub fn is_parallel_to(&self, other: &Vector) -> Result<bool, VectorError> {
        self.check_dimension(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(true);
        }
        // angle is 0 or pi iff |cos| is 1
        let cosine = self.unit_cosine_with(other)?;
        Ok(scalar::is_near_zero(
            scalar::sub(cosine.abs(), Decimal::ONE)?,
            DEFAULT_TOLERANCE,
        ))
    }

    /// Check whether the magnitude is below the default tolerance.
    pub fn is_zero(&self) -> bool {
        self.is_zero_within(DEFAULT_TOLERANCE)
    }

    /// Check whether the magnitude is below `tolerance`.
    ///
    /// A vector whose magnitude overflows is not zero.
    pub fn is_zero_within(&self, tolerance: Decimal) -> bool {
        self.magnitude().is_ok_and(|magnitude| magnitude < tolerance)
    }

    /// Projection of this vector onto the direction of `basis`.
    pub fn component_parallel_to(&self, basis: &Vector) -> Result<Vector, VectorError> {
        self.check_dimension(basis)?;
        let unit = basis.normalized().map_err(|err| match err {
            VectorError::CannotNormalizeZeroVector => VectorError::NoUniqueParallelComponent,
            err => err,
        })?;
        let weight = self.dot(&unit)?;
        unit.times_scalar(weight)
    }

    /// Component of this vector orthogonal to `basis`.
    pub fn component_orthogonal_to(&self, basis: &Vector) -> Result<Vector, VectorError> {
        let projection = self.component_parallel_to(basis)?;
        self.minus(&projection)
    }

    /// Cross product with another vector.
    ///
    /// Two dimensional vectors are embedded in three dimensions with a zero `z` coordinate.
    ///
    /// Example:
    ///
    /// ```
    /// use linsys_vector::Vector;
    ///
    /// let x = Vector::parse(&["1", "0"]).unwrap();
    /// let y = Vector::parse(&["0", "1"]).unwrap();
    /// let z = x.cross(&y).unwrap();
    /// assert_eq!(z, Vector::parse(&["0", "0", "1"]).unwrap());
    /// ```
    pub fn cross(&self, other: &Vector) -> Result<Vector, VectorError> {
        self.check_dimension(other)?;
        match self.dimension() {
            3 => {
                let (x1, y1, z1) = (self[0], self[1], self[2]);
                let (x2, y2, z2) = (other[0], other[1], other[2]);
                let coordinates = vec![
                    scalar::sub(scalar::mul(y1, z2)?, scalar::mul(y2, z1)?)?,
                    -scalar::sub(scalar::mul(x1, z2)?, scalar::mul(x2, z1)?)?,
                    scalar::sub(scalar::mul(x1, y2)?, scalar::mul(x2, y1)?)?,
                ];
                Ok(Vector { coordinates })
            }
            2 => self.embedded_in_r3().cross(&other.embedded_in_r3()),
            dimension => Err(VectorError::CrossProductUndefined(dimension)),
        }
    }

    fn embedded_in_r3(&self) -> Vector {
        let mut coordinates = self.coordinates.clone();
        coordinates.push(Decimal::ZERO);
        Vector { coordinates }
    }

    /// Area of the parallelogram spanned by two vectors.
    pub fn area_of_parallelogram(&self, other: &Vector) -> Result<Decimal, VectorError> {
        self.cross(other)?.magnitude()
    }

    /// Area of the triangle spanned by two vectors.
    pub fn area_of_triangle(&self, other: &Vector) -> Result<Decimal, VectorError> {
        scalar::div(self.area_of_parallelogram(other)?, Decimal::TWO)
    }
}

/// The one dimensional zero vector.
impl Default for Vector {
    fn default() -> Self {
        Self {
            coordinates: vec![Decimal::ZERO],
        }
    }
}

impl Index<usize> for Vector {
    type Output = Decimal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.coordinates[index]
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Vector {
            coordinates: self.coordinates.iter().map(|&c| -c).collect(),
        }
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl TryFrom<Vec<Decimal>> for Vector {
    type Error = VectorError;

    fn try_from(coordinates: Vec<Decimal>) -> Result<Self, Self::Error> {
        Self::new(coordinates)
    }
}

impl From<Vector> for Vec<Decimal> {
    fn from(vector: Vector) -> Self {
        vector.coordinates
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector: (")?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn vector(literals: &[&str]) -> Vector {
        Vector::parse(literals).unwrap()
    }

    fn random_vector(rng: &mut StdRng, dimension: usize) -> Vector {
        let coordinates = (0..dimension)
            .map(|_| Decimal::new(rng.random_range(-10_000..=10_000), 3))
            .collect();
        Vector::new(coordinates).unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(Vector::new(vec![]), Err(VectorError::EmptyCoordinates));
        assert_eq!(
            Vector::parse::<&str>(&[]),
            Err(VectorError::EmptyCoordinates)
        );
        assert_eq!(Vector::from_f64(&[]), Err(VectorError::EmptyCoordinates));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            Vector::parse(&["1", "x"]),
            Err(VectorError::InvalidCoordinate("x".to_string()))
        );
        assert!(matches!(
            Vector::from_f64(&[1.0, f64::NAN]),
            Err(VectorError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(vector(&["1.0", "2"]), vector(&["1", "2.00"]));
        assert_ne!(vector(&["1", "2"]), vector(&["1", "2", "0"]));
    }

    #[test]
    fn test_plus_minus() -> Result<(), VectorError> {
        let v = vector(&["8.218", "-9.341"]);
        let w = vector(&["-1.129", "2.111"]);
        assert_eq!(v.plus(&w)?, vector(&["7.089", "-7.230"]));

        let v = vector(&["7.119", "8.215"]);
        let w = vector(&["-8.223", "0.878"]);
        assert_eq!(v.minus(&w)?, vector(&["15.342", "7.337"]));
        Ok(())
    }

    #[test]
    fn test_dimension_mismatch() {
        let v = vector(&["1", "2"]);
        let w = vector(&["1", "2", "3"]);
        assert_eq!(v.plus(&w), Err(VectorError::DimensionMismatch(2, 3)));
        assert_eq!(v.dot(&w), Err(VectorError::DimensionMismatch(2, 3)));
        assert_eq!(w.cross(&v), Err(VectorError::DimensionMismatch(3, 2)));
        assert_eq!(
            v.is_parallel_to(&w),
            Err(VectorError::DimensionMismatch(2, 3))
        );
    }

    #[test]
    fn test_times_scalar() -> Result<(), VectorError> {
        let v = vector(&["1.671", "-1.012", "-0.318"]);
        let k = Decimal::new(741, 2);
        assert_eq!(
            v.times_scalar(k)?,
            vector(&["12.38211", "-7.49892", "-2.35638"])
        );
        Ok(())
    }

    #[test]
    fn test_times_scalar_overflow() {
        let v = vector(&["1", "1e20"]);
        let k = Decimal::from_scientific("1e10").unwrap();
        assert_eq!(v.times_scalar(k), Err(VectorError::Overflow));
    }

    #[test]
    fn test_magnitude_and_normalized() -> Result<(), VectorError> {
        let v = vector(&["3", "4"]);
        assert_eq!(v.magnitude()?, Decimal::from(5));
        assert_eq!(v.normalized()?, vector(&["0.6", "0.8"]));
        Ok(())
    }

    #[test]
    fn test_large_magnitudes() -> Result<(), VectorError> {
        let v = vector(&["1e15", "1e15"]);
        assert_eq!(v.magnitude(), Err(VectorError::Overflow));
        assert_eq!(v.normalized(), Err(VectorError::Overflow));
        assert_eq!(v.dot(&v), Err(VectorError::Overflow));
        assert!(!v.is_zero());

        // squares still fit below the decimal range
        let w = vector(&["3e13", "4e13"]);
        assert_eq!(w.magnitude()?, Decimal::from_scientific("5e13").unwrap());
        Ok(())
    }

    #[test]
    fn test_tiny_magnitudes() -> Result<(), VectorError> {
        // 1e-40 is finer than the smallest decimal scale
        let v = vector(&["1e-20", "0"]);
        assert_eq!(v.magnitude()?, Decimal::ZERO);
        assert!(v.is_zero());
        assert_eq!(v.normalized(), Err(VectorError::CannotNormalizeZeroVector));
        Ok(())
    }

    #[test]
    fn test_normalize_zero_vector() {
        let zero = vector(&["0", "0", "0"]);
        assert_eq!(zero.normalized(), Err(VectorError::CannotNormalizeZeroVector));
        let tiny = vector(&["1e-12", "0"]);
        assert_eq!(tiny.normalized(), Err(VectorError::CannotNormalizeZeroVector));
    }

    #[test]
    fn test_dot() -> Result<(), VectorError> {
        let v = vector(&["7.887", "4.138"]);
        let w = vector(&["-8.802", "6.776"]);
        assert_eq!(v.dot(&w)?, Decimal::new(-41_382_286, 6));
        Ok(())
    }

    #[test]
    fn test_angle_with() -> Result<(), VectorError> {
        let x = vector(&["1", "0"]);
        let y = vector(&["0", "1"]);
        let xy = vector(&["1", "1"]);
        assert_relative_eq!(
            x.angle_with(&y, AngleUnit::Radians)?,
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-10
        );
        assert_relative_eq!(x.angle_with(&xy, AngleUnit::Degrees)?, 45.0, epsilon = 1e-6);
        assert_relative_eq!(
            x.angle_with(&-&x, AngleUnit::Radians)?,
            std::f64::consts::PI,
            epsilon = 1e-10
        );
        Ok(())
    }

    #[test]
    fn test_angle_with_zero_vector() {
        let v = vector(&["1", "2"]);
        let zero = vector(&["0", "0"]);
        assert_eq!(
            v.angle_with(&zero, AngleUnit::Radians),
            Err(VectorError::AngleWithZeroVector)
        );
        assert_eq!(
            zero.angle_with(&v, AngleUnit::Degrees),
            Err(VectorError::AngleWithZeroVector)
        );
    }

    #[test]
    fn test_parallel_and_orthogonal() -> Result<(), VectorError> {
        let v = vector(&["-7.579", "-7.88"]);
        let w = vector(&["22.737", "23.64"]);
        assert!(v.is_parallel_to(&w)?);
        assert!(!v.is_orthogonal_to(&w)?);

        let v = vector(&["-2.328", "-7.284", "-1.214"]);
        let w = vector(&["-1.821", "1.072", "-2.94"]);
        assert!(!v.is_parallel_to(&w)?);
        assert!(v.is_orthogonal_to(&w)?);

        let v = vector(&["2", "4"]);
        let w = vector(&["1", "2"]);
        assert!(v.is_parallel_to(&w)?);
        assert!(v.is_parallel_to(&-&w)?);

        let zero = vector(&["0", "0"]);
        assert!(zero.is_parallel_to(&v)?);
        assert!(zero.is_orthogonal_to(&v)?);
        Ok(())
    }

    #[test]
    fn test_is_zero() {
        assert!(vector(&["0", "0"]).is_zero());
        assert!(vector(&["1e-11", "0"]).is_zero());
        assert!(!vector(&["1e-9", "0"]).is_zero());
        assert!(vector(&["1e-9", "0"]).is_zero_within(Decimal::new(1, 8)));
    }

    #[test]
    fn test_components() -> Result<(), VectorError> {
        let v = vector(&["3", "4"]);
        let basis = vector(&["1", "0"]);
        let parallel = v.component_parallel_to(&basis)?;
        let orthogonal = v.component_orthogonal_to(&basis)?;
        assert_eq!(parallel, vector(&["3", "0"]));
        assert_eq!(orthogonal, vector(&["0", "4"]));
        assert_eq!(parallel.plus(&orthogonal)?, v);
        Ok(())
    }

    #[test]
    fn test_components_decompose() -> Result<(), VectorError> {
        let v = vector(&["3.039", "1.879"]);
        let basis = vector(&["0.825", "2.036"]);
        let parallel = v.component_parallel_to(&basis)?;
        let orthogonal = v.component_orthogonal_to(&basis)?;
        assert!(parallel.is_parallel_to(&basis)?);
        assert!(orthogonal.is_orthogonal_to_within(&basis, Decimal::new(1, 12))?);
        assert_relative_eq!(scalar::to_f64(parallel[0]), 1.083, epsilon = 1e-3);
        assert_relative_eq!(scalar::to_f64(parallel[1]), 2.672, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn test_components_of_zero_basis() {
        let v = vector(&["3", "4"]);
        let zero = vector(&["0", "0"]);
        assert_eq!(
            v.component_parallel_to(&zero),
            Err(VectorError::NoUniqueParallelComponent)
        );
        assert_eq!(
            v.component_orthogonal_to(&zero),
            Err(VectorError::NoUniqueParallelComponent)
        );
    }

    #[test]
    fn test_cross() -> Result<(), VectorError> {
        let v = vector(&["8.462", "7.893", "-8.187"]);
        let w = vector(&["6.984", "-5.975", "4.778"]);
        assert_eq!(
            v.cross(&w)?,
            vector(&["-11.204571", "-97.609444", "-105.685162"])
        );
        Ok(())
    }

    #[test]
    fn test_cross_unsupported_dimension() {
        let v1 = vector(&["1"]);
        assert_eq!(v1.cross(&v1), Err(VectorError::CrossProductUndefined(1)));
        let v4 = vector(&["1", "2", "3", "4"]);
        assert_eq!(v4.cross(&v4), Err(VectorError::CrossProductUndefined(4)));
    }

    #[test]
    fn test_areas() -> Result<(), VectorError> {
        let v = vector(&["3", "0", "0"]);
        let w = vector(&["0", "4", "0"]);
        assert_eq!(v.area_of_parallelogram(&w)?, Decimal::from(12));
        assert_eq!(v.area_of_triangle(&w)?, Decimal::from(6));

        let v = vector(&["3", "0"]);
        let w = vector(&["1", "4"]);
        assert_eq!(v.area_of_parallelogram(&w)?, Decimal::from(12));
        Ok(())
    }

    #[test]
    fn test_display() {
        assert_eq!(vector(&["1", "-2.5"]).to_string(), "Vector: (1, -2.5)");
    }

    #[test]
    fn test_serde_revalidates() {
        let v = vector(&["1.5", "-2"]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(serde_json::from_str::<Vector>(&json).unwrap(), v);
        assert!(serde_json::from_str::<Vector>("[]").is_err());
    }

    #[test]
    fn test_algebraic_properties() -> Result<(), VectorError> {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let v = random_vector(&mut rng, 3);
            let w = random_vector(&mut rng, 3);

            assert_eq!(v.plus(&w)?.minus(&w)?, v);
            assert_eq!(v.dot(&w)?, w.dot(&v)?);
            assert_eq!(v.cross(&w)?, -w.cross(&v)?);
            assert!(scalar::is_near_zero(v.dot(&v.cross(&w)?)?, DEFAULT_TOLERANCE));

            if !v.is_zero() {
                let one = v.normalized()?.magnitude()?;
                assert!(scalar::is_near_zero(one - Decimal::ONE, DEFAULT_TOLERANCE));
            }
        }
        Ok(())
    }
}
