//! AQI library
//!
//! This library converts particulate-matter concentrations into EPA Air
//! Quality Index scores using the published PM2.5 and PM10 breakpoint
//! tables. It supports both std and no_std environments, but is best used
//! on systems with hardware floating point support.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

/// AQI value reported for concentrations above the top of a scale.
///
/// Readings beyond the highest breakpoint are a defined terminal
/// classification rather than an interpolated score.
pub const EXCEEDS_SCALE_AQI: u16 = 999;

/// Category enum provides the EPA AQI level names, plus the terminal
/// `ExceedsScale` classification for concentrations above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
    ExceedsScale,
}

impl Category {
    /// Lowercase label for reports and storage rows.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Good => "good",
            Category::Moderate => "moderate",
            Category::UnhealthySensitive => "unhealthy_sensitive",
            Category::Unhealthy => "unhealthy",
            Category::VeryUnhealthy => "very_unhealthy",
            Category::Hazardous => "hazardous",
            Category::ExceedsScale => "exceeds_scale",
        }
    }
}

/// One piecewise-linear segment of an AQI scale, mapping an inclusive
/// concentration range to an inclusive index range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub category: Category,
    pub c_lo: f32,
    pub c_hi: f32,
    pub aqi_lo: u16,
    pub aqi_hi: u16,
}

const fn bp(category: Category, c_lo: f32, c_hi: f32, aqi_lo: u16, aqi_hi: u16) -> Breakpoint {
    Breakpoint {
        category,
        c_lo,
        c_hi,
        aqi_lo,
        aqi_hi,
    }
}

/// PM2.5 breakpoints (µg/m³ → AQI), defined at 0.1 µg/m³ precision.
/// See https://forum.airnowtech.org/t/the-aqi-equation/169
pub const PM25_SCALE: [Breakpoint; 6] = [
    bp(Category::Good, 0.0, 12.0, 0, 50),
    bp(Category::Moderate, 12.1, 35.4, 51, 100),
    bp(Category::UnhealthySensitive, 35.5, 55.4, 101, 150),
    bp(Category::Unhealthy, 55.5, 150.4, 151, 200),
    bp(Category::VeryUnhealthy, 150.5, 250.4, 201, 300),
    bp(Category::Hazardous, 250.5, 500.4, 301, 500),
];

/// PM10 breakpoints (µg/m³ → AQI), defined at 1 µg/m³ precision.
pub const PM10_SCALE: [Breakpoint; 6] = [
    bp(Category::Good, 0.0, 54.0, 0, 50),
    bp(Category::Moderate, 55.0, 154.0, 51, 100),
    bp(Category::UnhealthySensitive, 155.0, 254.0, 101, 150),
    bp(Category::Unhealthy, 255.0, 354.0, 151, 200),
    bp(Category::VeryUnhealthy, 355.0, 424.0, 201, 300),
    bp(Category::Hazardous, 425.0, 604.0, 301, 500),
];

/// Particle size class selecting which breakpoint scale applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pollutant {
    Pm25,
    Pm10,
}

impl Pollutant {
    /// Parses a reporting label ("PM2.5" or "PM10") into a selector.
    ///
    /// Any other label is an invalid argument, never a silent default.
    pub fn from_label(label: &str) -> Result<Self, AqiError> {
        match label {
            "PM2.5" => Ok(Pollutant::Pm25),
            "PM10" => Ok(Pollutant::Pm10),
            _ => Err(AqiError::UnknownPollutant),
        }
    }

    /// The breakpoint scale for this size class.
    pub const fn scale(&self) -> &'static [Breakpoint; 6] {
        match self {
            Pollutant::Pm25 => &PM25_SCALE,
            Pollutant::Pm10 => &PM10_SCALE,
        }
    }

    // The scales are defined at the precision concentrations are reported
    // at: tenths of µg/m³ for PM2.5, whole µg/m³ for PM10. Readings must
    // be rounded to that precision before bucket lookup or in-range values
    // can fall into the gap between adjacent buckets (e.g. 12.05).
    fn round_for_reporting(&self, concentration: f32) -> f32 {
        match self {
            Pollutant::Pm25 => libm::roundf(concentration * 10.0) / 10.0,
            Pollutant::Pm10 => libm::roundf(concentration),
        }
    }
}

/// Failure modes of the AQI engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiError {
    /// Negative (or NaN) concentration. The sensor layer should never
    /// produce these; the engine rejects rather than clamping to zero.
    NegativeConcentration,
    /// Pollutant label is not one of the supported size classes.
    UnknownPollutant,
    /// An in-range concentration matched zero or multiple buckets, or a
    /// scale failed its construction invariants. A programming defect in
    /// the static tables, not a runtime data problem. Fatal.
    TableConsistency,
}

impl core::fmt::Display for AqiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            AqiError::NegativeConcentration => "concentration must be non-negative",
            AqiError::UnknownPollutant => "unknown pollutant size class",
            AqiError::TableConsistency => "breakpoint table consistency violation",
        };
        f.write_str(msg)
    }
}

/// Outcome of a bucket lookup. `ExceedsScale` is a classification, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    InScale(&'a Breakpoint),
    ExceedsScale,
}

/// A computed AQI score with its category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiReading {
    pub aqi: u16,
    pub category: Category,
}

/// Checks the construction invariants of a breakpoint scale.
///
/// Buckets must be non-empty, start at non-negative concentrations, have
/// strictly positive width (a zero-width bucket would divide by zero during
/// interpolation, so it must fail here at load time rather than at query
/// time), and ascend without overlap in both concentration and index.
///
/// # Arguments
///
/// * `scale` - The breakpoint scale to check
///
/// # Returns
///
/// `Ok(())`, or `AqiError::TableConsistency` on the first violated
/// invariant.
pub fn validate_scale(scale: &[Breakpoint]) -> Result<(), AqiError> {
    if scale.is_empty() {
        return Err(AqiError::TableConsistency);
    }

    for bucket in scale {
        if bucket.c_lo < 0.0 || bucket.c_lo >= bucket.c_hi || bucket.aqi_lo > bucket.aqi_hi {
            return Err(AqiError::TableConsistency);
        }
    }

    for pair in scale.windows(2) {
        if pair[0].c_hi >= pair[1].c_lo || pair[0].aqi_hi >= pair[1].aqi_lo {
            return Err(AqiError::TableConsistency);
        }
    }

    Ok(())
}

/// Finds the breakpoint bucket covering a concentration.
///
/// Bucket bounds are inclusive on both ends and the scan runs in ascending
/// order with the first match winning, so a reading sitting exactly on a
/// boundary deterministically resolves to the lower-severity bucket.
///
/// # Arguments
///
/// * `concentration` - A non-negative reading already rounded to the
///   scale's reporting precision
/// * `scale` - The breakpoint scale for the pollutant
///
/// # Returns
///
/// `Resolution::InScale` with the unique matching bucket,
/// `Resolution::ExceedsScale` for concentrations above the top bucket, or
/// `AqiError::TableConsistency` if the scale yielded zero or multiple
/// matches for an in-range value.
pub fn resolve_bucket<'a>(
    concentration: f32,
    scale: &'a [Breakpoint],
) -> Result<Resolution<'a>, AqiError> {
    let top = scale.last().ok_or(AqiError::TableConsistency)?;
    if concentration > top.c_hi {
        return Ok(Resolution::ExceedsScale);
    }

    let mut matched: Option<&Breakpoint> = None;
    for bucket in scale {
        if concentration >= bucket.c_lo && concentration <= bucket.c_hi {
            if matched.is_some() {
                return Err(AqiError::TableConsistency);
            }
            matched = Some(bucket);
        }
    }

    match matched {
        Some(bucket) => Ok(Resolution::InScale(bucket)),
        None => Err(AqiError::TableConsistency),
    }
}

/// Computes the AQI for a particulate concentration.
///
/// The concentration is first rounded to the pollutant's reporting
/// precision (one decimal for PM2.5, whole numbers for PM10) and then
/// resolved against that pollutant's breakpoint scale. In-scale readings
/// are linearly interpolated within their bucket:
///
/// `AQI = (AQIhigh - AQIlow) / (Chigh - Clow) * (C - Clow) + AQIlow`
///
/// and rounded to the nearest integer with ties away from zero (half-up
/// for this non-negative domain). Readings above the top of the scale
/// yield the fixed [`EXCEEDS_SCALE_AQI`] marker with the `ExceedsScale`
/// category.
///
/// # Arguments
///
/// * `concentration` - The raw sensor reading in µg/m³
/// * `pollutant` - The particle size class
///
/// # Returns
///
/// The AQI score and category. These values may be confirmed using
/// the calculator at https://www.airnow.gov/aqi/aqi-calculator-concentration/
///
/// # Examples
///
/// ```
/// use aqi::{compute_aqi, Category, Pollutant};
///
/// let reading = compute_aqi(35.4, Pollutant::Pm25).unwrap();
/// assert_eq!(reading.aqi, 100);
/// assert_eq!(reading.category, Category::Moderate);
/// ```
pub fn compute_aqi(concentration: f32, pollutant: Pollutant) -> Result<AqiReading, AqiError> {
    // Rejects NaN as well, since NaN fails every comparison.
    if !(concentration >= 0.0) {
        return Err(AqiError::NegativeConcentration);
    }

    let rounded = pollutant.round_for_reporting(concentration);
    let bucket = match resolve_bucket(rounded, pollutant.scale())? {
        Resolution::ExceedsScale => {
            return Ok(AqiReading {
                aqi: EXCEEDS_SCALE_AQI,
                category: Category::ExceedsScale,
            });
        }
        Resolution::InScale(bucket) => bucket,
    };

    // Linear interpolation formula transcribed from EPA documentation.
    // Zero-width buckets are rejected by validate_scale, so the divisor
    // is always positive here.
    let aqi = (bucket.aqi_hi - bucket.aqi_lo) as f32 / (bucket.c_hi - bucket.c_lo)
        * (rounded - bucket.c_lo)
        + bucket.aqi_lo as f32;

    Ok(AqiReading {
        aqi: libm::roundf(aqi) as u16,
        category: bucket.category,
    })
}
