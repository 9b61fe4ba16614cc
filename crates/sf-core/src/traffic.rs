//! Heavy-vehicle traffic derived from annual average daily traffic counts.

/// Heavy-vehicle shares above this are percent-times-ten values that were
/// recorded without the decimal point.
const MIS_SCALED_RATIO: f64 = 40.0;

/// Daily heavy-vehicle traffic for a road section.
///
/// - `tmja`: average daily traffic, all vehicles.
/// - `ratio_pl`: heavy-vehicle share in percent.  Values above 40 are read as
///   mis-scaled and divided by 10 first.
#[inline]
pub fn heavy_vehicle_traffic(tmja: f64, ratio_pl: f64) -> f64 {
    let ratio = if ratio_pl > MIS_SCALED_RATIO { ratio_pl / 10.0 } else { ratio_pl };
    tmja * (ratio / 100.0)
}
