use crate::error::{Error, Result};

/// Extends functionality for slices of float arrays
pub trait SliceExt<T> {
    /// Find the minimum value in float arrays
    ///
    /// Only provides the minimum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use shieldrun_utils::SliceExt;
    /// # use shieldrun_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1, 0.5, 2.2].try_min(), Ok(0.5));
    /// assert_eq!([1.1, f64::MIN, 2.2].try_min(), Ok(f64::MIN));
    ///
    /// // Error cases
    /// assert_eq!([1.1, f64::NAN, 2.2].try_min(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_min(), Err(Error::SliceContainsNoValues));
    /// ```
    ///
    /// The float primitives do not implement `Ord` due to `NaN` being
    /// incomparable, so this uses `total_cmp` to always produce an ordering in
    /// accordance to the IEEE 754 totalOrder predicate.
    fn try_min(&self) -> Result<T>;

    /// Find the maximum value in float arrays
    ///
    /// Only provides the maximum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use shieldrun_utils::SliceExt;
    /// # use shieldrun_utils::Error;
    /// assert_eq!([1.1, 0.5, 2.2].try_max(), Ok(2.2));
    /// assert_eq!([1.1, f64::INFINITY, 2.2].try_max(), Err(Error::SliceContainsUndefinedValues));
    /// ```
    fn try_max(&self) -> Result<T>;

    /// Find index bin containing 'value', where bins are low < value <= high
    ///
    /// A value on a bin edge returns the bin below. Values equal to the lowest
    /// bound are considered part of the first bin.
    ///
    /// ```rust
    /// # use shieldrun_utils::SliceExt;
    /// let bounds = vec![0.0, 0.1, 1.0, 20.0];
    ///
    /// // Find values in the array
    /// assert_eq!(bounds.find_bin_inclusive(0.0 ), Ok(0));
    /// assert_eq!(bounds.find_bin_inclusive(0.5 ), Ok(1));
    /// assert_eq!(bounds.find_bin_inclusive(1.0 ), Ok(1));
    /// assert_eq!(bounds.find_bin_inclusive(20.0), Ok(2));
    ///
    /// // Values outside the bin bounds are an error case
    /// assert!(bounds.find_bin_inclusive(-1.0).is_err());
    /// assert!(bounds.find_bin_inclusive(21.0).is_err());
    /// ```
    fn find_bin_inclusive(&self, value: T) -> Result<usize>;

    /// Linear-linear interpolation of tabulated `y` values at `value`
    ///
    /// The slice is taken as the ascending `x` grid. Values outside of the
    /// grid are an error case, leaving the caller to decide what an
    /// out-of-range lookup means.
    ///
    /// ```rust
    /// # use shieldrun_utils::SliceExt;
    /// let x = [1.0, 2.0, 4.0];
    /// let y = [10.0, 20.0, 0.0];
    ///
    /// assert_eq!(x.interpolate(&y, 1.5), Ok(15.0));
    /// assert_eq!(x.interpolate(&y, 3.0), Ok(10.0));
    /// assert_eq!(x.interpolate(&y, 4.0), Ok(0.0));
    /// assert!(x.interpolate(&y, 5.0).is_err());
    /// ```
    fn interpolate(&self, y: &[T], value: T) -> Result<T>;
}

impl SliceExt<f64> for [f64] {
    fn try_min(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        self.iter()
            .min_by(|a, b| a.total_cmp(b))
            .copied()
            .ok_or(Error::SliceContainsNoValues)
    }

    fn try_max(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        self.iter()
            .max_by(|a, b| a.total_cmp(b))
            .copied()
            .ok_or(Error::SliceContainsNoValues)
    }

    fn find_bin_inclusive(&self, value: f64) -> Result<usize> {
        // make sure there are bin edges to check against
        let n = self.len();
        if n < 2 {
            return Err(Error::BelowMinimumSliceLength {
                length: n,
                minimum_required: 2,
            });
        }

        let (lower_bound, upper_bound) = (self[0], self[n - 1]);

        // is the value relevant?
        if value < lower_bound || value > upper_bound {
            return Err(Error::ValueOutsideOfBounds {
                value,
                lower_bound,
                upper_bound,
            });
        }

        // special case for being on the lowest edge
        if value == lower_bound {
            return Ok(0);
        }

        // try to find the bin index, range INCLUSIVE of upper edge
        for (idx, edges) in self.windows(2).enumerate() {
            if edges[0] < value && value <= edges[1] {
                return Ok(idx);
            }
        }

        // this should be unreachable
        Err(Error::UncapturedErrorCondition)
    }

    fn interpolate(&self, y: &[f64], value: f64) -> Result<f64> {
        if self.len() != y.len() {
            return Err(Error::MismatchedSliceLengths {
                x: self.len(),
                y: y.len(),
            });
        }

        let idx = self.find_bin_inclusive(value)?;
        let (x0, x1) = (self[idx], self[idx + 1]);
        let (y0, y1) = (y[idx], y[idx + 1]);

        // zero-width bins would divide by zero, take the lower value
        if x1 == x0 {
            return Ok(y0);
        }

        let t = (value - x0) / (x1 - x0);
        Ok(y0 + t * (y1 - y0))
    }
}
