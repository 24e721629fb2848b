//! Closed-form diagnostic index formulas.
//!
//! HGI, VGI, FABA, PPA and MAB use the simplified clinical forms. The fuller
//! weighted variants (HGI with UGA/PCBA terms, FABA/PPA from the complete
//! angle chain) are not implemented; values from those variants differ.

use crate::geometry::round_to;

/// Horizontal growth indicator, simplified: `0.2 × (MBL − ACBL) × 2`.
pub fn hgi(mbl: f64, acbl: f64) -> f64 {
    round_to(0.2 * ((mbl - acbl) * 2.0), 1)
}

/// Vertical growth indicator: `0.2 × (FHR − 60) × 2`.
pub fn vgi(fhr: f64) -> f64 {
    round_to(0.2 * ((fhr - 60.0) * 2.0), 1)
}

/// Facial axis / basal angle proxy: `ANB + 5`.
pub fn faba(anb: f64) -> f64 {
    round_to(anb + 5.0, 1)
}

/// Palatal plane angle proxy: `FMA − 25`.
pub fn ppa(fma: f64) -> f64 {
    round_to(fma - 25.0, 1)
}

/// Anteroposterior dysplasia indicator.
pub fn apdi(faba: f64, ppa: f64) -> f64 {
    round_to(faba + ppa, 1)
}

/// Mandibular axis angle proxy: `90 − IMPA`.
pub fn mab(impa: f64) -> f64 {
    round_to(90.0 - impa, 1)
}

/// Overbite depth indicator.
pub fn odi(mab: f64, ppa: f64) -> f64 {
    round_to(mab + ppa, 1)
}

/// Ideal APDI for the patient's vertical pattern.
///
/// Two regimes: at or above the APDI norm of 81 the ideal depends on FMA
/// alone; below it, the ideal slides with FMA weighted by `cos(ANB)`.
pub fn iapdi(apdi: f64, fma: f64, anb: f64) -> f64 {
    let value = if apdi >= 81.0 {
        if fma < 27.5 {
            95.0 - 0.5 * fma
        } else {
            81.0
        }
    } else {
        let a = (3.5 / 4.4) * anb.to_radians().cos();
        81.0 - a * (fma - 27.5)
    };
    round_to(value, 1)
}

/// Ideal ODI for the patient's vertical and sagittal pattern.
pub fn iodi(fma: f64, anb: f64) -> f64 {
    round_to(80.0 - 0.3 * fma - (0.776 - 0.008 * fma) * (anb - 2.0), 1)
}

/// Anteroposterior difference: returns `(APDL, 2APDL)`.
pub fn apdl(apdi: f64, iapdi: f64) -> (f64, f64) {
    let apdl = round_to(0.8 * (apdi - iapdi), 1);
    (apdl, round_to(2.0 * apdl, 1))
}

/// Vertical difference.
pub fn vdl(odi: f64, iodi: f64) -> f64 {
    round_to(0.4849 * (odi - iodi), 1)
}

/// Combination factor difference.
pub fn cfd(odi: f64, apdi: f64, iapdi: f64, iodi: f64) -> f64 {
    round_to(odi + apdi - iapdi - iodi, 1)
}

/// Extraction index.
///
/// Callers only invoke this with computed ODI and APDI; with either one
/// missing EI takes its fallback.
pub fn ei(odi: f64, apdi: f64, interincisal: f64, e_line_upper: f64, e_line_lower: f64) -> f64 {
    round_to(
        odi + apdi + (interincisal - 125.0) / 5.0 - (e_line_upper + e_line_lower),
        1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_close;

    #[test]
    fn growth_indicators() {
        assert_eq!(hgi(75.0, 70.0), 2.0);
        assert_eq!(vgi(65.0), 2.0);
        assert_eq!(vgi(60.0), 0.0);
    }

    #[test]
    fn norm_patient_sits_near_apdi_norm() {
        let f = faba(2.0);
        let p = ppa(25.0);
        assert_eq!(f, 7.0);
        assert_eq!(p, 0.0);
        assert_eq!(apdi(f, p), 7.0);
        assert_eq!(odi(mab(90.0), p), 0.0);
    }

    #[test]
    fn iapdi_branches() {
        // APDI at or above 81, low FMA.
        assert_eq!(iapdi(81.0, 20.0, 2.0), 85.0);
        // APDI at or above 81, high FMA.
        assert_eq!(iapdi(85.0, 30.0, 2.0), 81.0);
        // Below 81: FMA at 27.5 leaves the ideal at 81 regardless of ANB.
        assert_eq!(iapdi(70.0, 27.5, 10.0), 81.0);
        // Below 81, ANB 0: slope is exactly 3.5/4.4.
        let expected = round_to(81.0 - (3.5 / 4.4) * (30.0 - 27.5), 1);
        assert_eq!(iapdi(70.0, 30.0, 0.0), expected);
        assert_close(expected, 79.0, 1e-9);
    }

    #[test]
    fn iodi_at_norm_anb() {
        assert_eq!(iodi(25.0, 2.0), 72.5);
        assert_eq!(iodi(20.0, 4.0), round_to(80.0 - 6.0 - 0.616 * 2.0, 1));
    }

    #[test]
    fn differences() {
        assert_eq!(apdl(81.0, 76.0), (4.0, 8.0));
        assert_eq!(vdl(74.5, 74.5), 0.0);
        assert_eq!(cfd(74.5, 81.4, 81.0, 80.0), round_to(74.5 + 81.4 - 81.0 - 80.0, 1));
    }

    #[test]
    fn extraction_index_subtracts_lip_protrusion() {
        // Retrusive lips raise the index.
        let retrusive = ei(0.0, 7.0, 130.0, -4.0, -2.0);
        let protrusive = ei(0.0, 7.0, 130.0, 2.0, 3.0);
        assert_eq!(retrusive, 14.0);
        assert_eq!(protrusive, 3.0);
    }
}
