use crate::error::Error;
use crate::sys;
use std::fmt;
use std::str::FromStr;

/// Resampling filter used by [`Image::resize`](crate::Image::resize).
///
/// The names match the ones the `gm` command line accepts for `-filter`. The empty
/// name selects `Undefined`, which lets the library pick a filter itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterType {
    #[default]
    Undefined,
    Point,
    Box,
    Triangle,
    Hermite,
    Hanning,
    Hamming,
    Blackman,
    Gaussian,
    Quadratic,
    Cubic,
    Catrom,
    Mitchell,
    Lanczos,
    Bessel,
    Sinc,
}

impl FilterType {
    pub const ALL: [FilterType; 16] = [
        FilterType::Undefined,
        FilterType::Point,
        FilterType::Box,
        FilterType::Triangle,
        FilterType::Hermite,
        FilterType::Hanning,
        FilterType::Hamming,
        FilterType::Blackman,
        FilterType::Gaussian,
        FilterType::Quadratic,
        FilterType::Cubic,
        FilterType::Catrom,
        FilterType::Mitchell,
        FilterType::Lanczos,
        FilterType::Bessel,
        FilterType::Sinc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Undefined => "",
            FilterType::Point => "Point",
            FilterType::Box => "Box",
            FilterType::Triangle => "Triangle",
            FilterType::Hermite => "Hermite",
            FilterType::Hanning => "Hanning",
            FilterType::Hamming => "Hamming",
            FilterType::Blackman => "Blackman",
            FilterType::Gaussian => "Gaussian",
            FilterType::Quadratic => "Quadratic",
            FilterType::Cubic => "Cubic",
            FilterType::Catrom => "Catrom",
            FilterType::Mitchell => "Mitchell",
            FilterType::Lanczos => "Lanczos",
            FilterType::Bessel => "Bessel",
            FilterType::Sinc => "Sinc",
        }
    }

    pub(crate) fn to_sys(self) -> sys::FilterTypes {
        match self {
            FilterType::Undefined => sys::FilterTypes::UndefinedFilter,
            FilterType::Point => sys::FilterTypes::PointFilter,
            FilterType::Box => sys::FilterTypes::BoxFilter,
            FilterType::Triangle => sys::FilterTypes::TriangleFilter,
            FilterType::Hermite => sys::FilterTypes::HermiteFilter,
            FilterType::Hanning => sys::FilterTypes::HanningFilter,
            FilterType::Hamming => sys::FilterTypes::HammingFilter,
            FilterType::Blackman => sys::FilterTypes::BlackmanFilter,
            FilterType::Gaussian => sys::FilterTypes::GaussianFilter,
            FilterType::Quadratic => sys::FilterTypes::QuadraticFilter,
            FilterType::Cubic => sys::FilterTypes::CubicFilter,
            FilterType::Catrom => sys::FilterTypes::CatromFilter,
            FilterType::Mitchell => sys::FilterTypes::MitchellFilter,
            FilterType::Lanczos => sys::FilterTypes::LanczosFilter,
            FilterType::Bessel => sys::FilterTypes::BesselFilter,
            FilterType::Sinc => sys::FilterTypes::SincFilter,
        }
    }
}

impl FromStr for FilterType {
    type Err = Error;

    /// Exact, case-sensitive lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterType::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::UnknownFilter(s.to_string()))
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
