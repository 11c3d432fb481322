//! Natural isotopic compositions
//!
//! Abundances are IUPAC 2013 atom fractions and masses are atomic masses from
//! AME2016, the same reference data used by the transport engine when it
//! expands elements itself.

/// A naturally occurring isotope of an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Isotope {
    /// Nuclide name in GNDS format (e.g. `Li6`)
    pub name: &'static str,
    /// Natural abundance as an atom fraction
    pub abundance: f64,
    /// Atomic mass (u)
    pub mass: f64,
}

const fn iso(name: &'static str, abundance: f64, mass: f64) -> Isotope {
    Isotope {
        name,
        abundance,
        mass,
    }
}

const HYDROGEN: &[Isotope] = &[
    iso("H1", 0.999885, 1.00782503223),
    iso("H2", 0.000115, 2.01410177812),
];

const HELIUM: &[Isotope] = &[
    iso("He3", 0.00000134, 3.0160293201),
    iso("He4", 0.99999866, 4.00260325413),
];

const LITHIUM: &[Isotope] = &[
    iso("Li6", 0.0759, 6.0151228874),
    iso("Li7", 0.9241, 7.0160034366),
];

const BERYLLIUM: &[Isotope] = &[iso("Be9", 1.0, 9.012183065)];

const BORON: &[Isotope] = &[
    iso("B10", 0.199, 10.01293695),
    iso("B11", 0.801, 11.00930536),
];

const CARBON: &[Isotope] = &[
    iso("C12", 0.9893, 12.0),
    iso("C13", 0.0107, 13.00335483507),
];

const NITROGEN: &[Isotope] = &[
    iso("N14", 0.99636, 14.00307400443),
    iso("N15", 0.00364, 15.00010889888),
];

const OXYGEN: &[Isotope] = &[
    iso("O16", 0.99757, 15.99491461957),
    iso("O17", 0.00038, 16.9991317565),
    iso("O18", 0.00205, 17.99915961286),
];

const IRON: &[Isotope] = &[
    iso("Fe54", 0.05845, 53.9396090),
    iso("Fe56", 0.91754, 55.9349363),
    iso("Fe57", 0.02119, 56.9353928),
    iso("Fe58", 0.00282, 57.9332744),
];

const LEAD: &[Isotope] = &[
    iso("Pb204", 0.014, 203.9730436),
    iso("Pb206", 0.241, 205.9744653),
    iso("Pb207", 0.221, 206.9758969),
    iso("Pb208", 0.524, 207.9766521),
];

/// Natural isotopes of an element by chemical symbol
///
/// Symbols are case-insensitive. Returns `None` for elements without data.
///
/// ```rust
/// # use shieldrun_model::natural_isotopes;
/// let lithium = natural_isotopes("li").unwrap();
/// assert_eq!(lithium[0].name, "Li6");
/// assert_eq!(lithium[0].abundance, 0.0759);
///
/// assert!(natural_isotopes("Xx").is_none());
/// ```
pub fn natural_isotopes(symbol: &str) -> Option<&'static [Isotope]> {
    let isotopes = match symbol.trim().to_lowercase().as_str() {
        "h" => HYDROGEN,
        "he" => HELIUM,
        "li" => LITHIUM,
        "be" => BERYLLIUM,
        "b" => BORON,
        "c" => CARBON,
        "n" => NITROGEN,
        "o" => OXYGEN,
        "fe" => IRON,
        "pb" => LEAD,
        _ => return None,
    };
    Some(isotopes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abundances_are_normalised() {
        for symbol in ["H", "He", "Li", "Be", "B", "C", "N", "O", "Fe", "Pb"] {
            let total: f64 = natural_isotopes(symbol)
                .unwrap()
                .iter()
                .map(|i| i.abundance)
                .sum();
            assert!((total - 1.0).abs() < 1.0e-9, "{symbol} sums to {total}");
        }
    }

    #[test]
    fn isotope_names_carry_the_symbol() {
        for isotope in natural_isotopes("PB").unwrap() {
            assert!(isotope.name.starts_with("Pb"));
        }
    }
}
