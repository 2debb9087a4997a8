//! Classification des enfants par tranche d'âge.
//!
//! Le nom d'une salle détermine sa tranche d'âge ; la fonction inverse
//! (âge → salle) est la seule source de vérité utilisée par le seed,
//! la route `POST /enfants/reclasser` et le binaire `reclassify-salles`.

use chrono::NaiveDate;

pub const JARDIN: &str = "Jardin";
pub const AINES: &str = "Ainés";
pub const JUNIORS: &str = "Juniors";
pub const CADETS: &str = "Cadets";
pub const ADOLESCENTS: &str = "Adolescents";

/// Marqueur de départ : un nom de salle sans ligne `salles` correspondante.
pub const ADO_PARTI: &str = "ADO PARTI";

/// Les cinq salles standard, de la plus jeune à la plus âgée.
pub const SALLES_STANDARD: [&str; 5] = [JARDIN, AINES, JUNIORS, CADETS, ADOLESCENTS];

/// Cible d'affectation calculée pour un enfant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalleCible {
    /// Âge inconnu : on ne touche pas à l'affectation existante.
    Inchangee,
    /// Moins de 3 ans : pas encore de salle.
    NonAffectee,
    /// Plus de 18 ans : marqueur "ADO PARTI", jamais de salle_id.
    AdoParti,
    /// Tranche d'âge couverte par une salle standard.
    Salle(&'static str),
}

impl SalleCible {
    /// Nom à écrire dans `salle_nom` (None = effacer).
    pub fn nom(&self) -> Option<&'static str> {
        match self {
            SalleCible::Inchangee | SalleCible::NonAffectee => None,
            SalleCible::AdoParti => Some(ADO_PARTI),
            SalleCible::Salle(nom) => Some(nom),
        }
    }
}

/// Âge révolu à la date de référence : un enfant prend N ans le jour
/// anniversaire de sa naissance (un 29 février compte au 1er mars les
/// années non bissextiles).
pub fn age_revolu(naissance: NaiveDate, reference: NaiveDate) -> i32 {
    use chrono::Datelike;
    let mut age = reference.year() - naissance.year();
    if (reference.month(), reference.day()) < (naissance.month(), naissance.day()) {
        age -= 1;
    }
    age
}

/// Tranches ordonnées du plus âgé au plus jeune.
pub fn salle_pour_age(age: Option<i32>) -> SalleCible {
    match age {
        None => SalleCible::Inchangee,
        Some(a) if a > 18 => SalleCible::AdoParti,
        Some(a) if a >= 14 => SalleCible::Salle(ADOLESCENTS),
        Some(a) if a >= 10 => SalleCible::Salle(CADETS),
        Some(a) if a >= 8 => SalleCible::Salle(JUNIORS),
        Some(a) if a >= 6 => SalleCible::Salle(AINES),
        Some(a) if a >= 3 => SalleCible::Salle(JARDIN),
        Some(_) => SalleCible::NonAffectee,
    }
}

pub fn salle_pour_naissance(naissance: Option<NaiveDate>, reference: NaiveDate) -> SalleCible {
    salle_pour_age(naissance.map(|n| age_revolu(n, reference)))
}

/// Parseur indulgent pour les dates saisies ou importées : toute valeur
/// inexploitable est traitée comme "date inconnue", jamais comme une erreur.
pub fn parse_date_souple(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return Some(d);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tranches_nominales() {
        for a in 3..=5 {
            assert_eq!(salle_pour_age(Some(a)), SalleCible::Salle(JARDIN));
        }
        for a in 6..=7 {
            assert_eq!(salle_pour_age(Some(a)), SalleCible::Salle(AINES));
        }
        for a in 8..=9 {
            assert_eq!(salle_pour_age(Some(a)), SalleCible::Salle(JUNIORS));
        }
        for a in 10..=13 {
            assert_eq!(salle_pour_age(Some(a)), SalleCible::Salle(CADETS));
        }
        for a in 14..=18 {
            assert_eq!(salle_pour_age(Some(a)), SalleCible::Salle(ADOLESCENTS));
        }
    }

    #[test]
    fn hors_tranches() {
        // Moins de 3 ans : aucune affectation
        assert_eq!(salle_pour_age(Some(0)), SalleCible::NonAffectee);
        assert_eq!(salle_pour_age(Some(2)), SalleCible::NonAffectee);
        // Plus de 18 ans : marqueur de départ, sans salle_id
        assert_eq!(salle_pour_age(Some(19)), SalleCible::AdoParti);
        assert_eq!(salle_pour_age(Some(19)).nom(), Some(ADO_PARTI));
        // Âge inconnu : l'affectation existante reste telle quelle
        assert_eq!(salle_pour_age(None), SalleCible::Inchangee);
        assert_eq!(salle_pour_age(None).nom(), None);
    }

    #[test]
    fn age_revolu_autour_de_l_anniversaire() {
        let naissance = date(2012, 3, 15);
        // La veille des 14 ans : encore 13
        assert_eq!(age_revolu(naissance, date(2026, 3, 14)), 13);
        // Le jour même et après : 14
        assert_eq!(age_revolu(naissance, date(2026, 3, 15)), 14);
        assert_eq!(age_revolu(naissance, date(2026, 3, 16)), 14);
    }

    #[test]
    fn bascule_cadets_adolescents_a_l_anniversaire() {
        let naissance = date(2012, 3, 15);
        assert_eq!(
            salle_pour_naissance(Some(naissance), date(2026, 3, 14)),
            SalleCible::Salle(CADETS)
        );
        assert_eq!(
            salle_pour_naissance(Some(naissance), date(2026, 3, 15)),
            SalleCible::Salle(ADOLESCENTS)
        );
    }

    #[test]
    fn dix_ans_exactement_va_aux_cadets() {
        let reference = date(2026, 8, 6);
        let naissance = date(2016, 8, 6);
        assert_eq!(
            salle_pour_naissance(Some(naissance), reference),
            SalleCible::Salle(CADETS)
        );
    }

    #[test]
    fn naissance_bissextile() {
        let naissance = date(2016, 2, 29);
        // Année non bissextile : l'anniversaire compte au 1er mars
        assert_eq!(age_revolu(naissance, date(2026, 2, 28)), 9);
        assert_eq!(age_revolu(naissance, date(2026, 3, 1)), 10);
    }

    #[test]
    fn date_inconnue_ou_malformee() {
        let reference = date(2026, 8, 6);
        assert_eq!(salle_pour_naissance(None, reference), SalleCible::Inchangee);
        // Une date malformée se comporte exactement comme une date absente
        assert_eq!(parse_date_souple("pas-une-date"), None);
        assert_eq!(parse_date_souple("2026-13-45"), None);
        assert_eq!(parse_date_souple(""), None);
        assert_eq!(
            salle_pour_naissance(parse_date_souple("n/a"), reference),
            SalleCible::Inchangee
        );
    }

    #[test]
    fn formats_de_dates_acceptes() {
        assert_eq!(parse_date_souple("2016-08-06"), Some(date(2016, 8, 6)));
        assert_eq!(parse_date_souple("06/08/2016"), Some(date(2016, 8, 6)));
        assert_eq!(parse_date_souple(" 06-08-2016 "), Some(date(2016, 8, 6)));
    }
}
