use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::model::{FilenameMetadata, Make};

/// One row of the classification table. `matches` sees the uppercased
/// basename first and the raw basename second.
struct Rule {
    make: Make,
    matches: fn(&str, &str) -> bool,
    model: fn(&str) -> &'static str,
    dated: bool,
}

// Order is significant: the first matching rule decides the make.
const RULES: &[Rule] = &[
    Rule {
        make: Make::Volkswagen,
        matches: |upper, _| {
            ["CALIFORNIA", "CARAVELLE", "MULTIVAN", "TRANSPORTER", "MT7", "CT7"]
                .iter()
                .any(|kw| upper.contains(kw))
        },
        model: volkswagen_model,
        dated: true,
    },
    Rule {
        make: Make::Ford,
        matches: |upper, _| upper.contains("FORD") || upper.contains("TRANSIT"),
        model: |_| "Transit Custom",
        dated: false,
    },
    Rule {
        make: Make::Opel,
        matches: |upper, _| upper.contains("VIVARO") || upper.contains("ZAFIRA"),
        model: opel_model,
        dated: false,
    },
    Rule {
        make: Make::Peugeot,
        matches: |upper, _| upper.contains("EXPERT"),
        model: peugeot_model,
        dated: false,
    },
    Rule {
        make: Make::Toyota,
        matches: |upper, _| upper.contains("PROACE"),
        model: toyota_model,
        dated: false,
    },
    Rule {
        make: Make::Citroen,
        matches: |upper, _| upper.contains("SPACE") && upper.contains("TOURER"),
        model: |_| "SpaceTourer",
        dated: false,
    },
    Rule {
        make: Make::Citroen,
        matches: |_, raw| raw.to_lowercase().starts_with("citroen"),
        model: |_| "SpaceTourer",
        dated: false,
    },
];

fn volkswagen_model(upper: &str) -> &'static str {
    if upper.contains("CALIFORNIA") || upper.contains("CT7") {
        "California"
    } else if upper.contains("CARAVELLE") {
        "Caravelle"
    } else if upper.contains("MULTIVAN") || upper.contains("MT7") {
        "Multivan"
    } else {
        "Transporter"
    }
}

fn opel_model(upper: &str) -> &'static str {
    if upper.contains("ZAFIRA") {
        "Zafira Life"
    } else if upper.contains("VAN") {
        "Vivaro Van"
    } else if upper.contains("COMBI") {
        "Vivaro Combi"
    } else {
        "Vivaro"
    }
}

fn peugeot_model(upper: &str) -> &'static str {
    if upper.contains("COMBI") || upper.contains("TRAVELLER") {
        "Expert Combi/Traveller"
    } else if upper.contains("FURGON") {
        "Expert Furgon"
    } else {
        "Expert"
    }
}

fn toyota_model(upper: &str) -> &'static str {
    if !upper.contains("VERSO") {
        "ProAce"
    } else if upper.contains("EV") {
        "ProAce Verso EV"
    } else {
        "ProAce Verso"
    }
}

fn duplicate_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\(\d+\)\s*$").unwrap())
}

fn model_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)MJ(\d{4})").unwrap())
}

fn dotted_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2})\.(\d{1,2})\.(\d{4})").unwrap())
}

fn compact_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{2})(\d{2})(\d{4})").unwrap())
}

/// File stem with a single trailing `(n)` duplicate marker removed.
pub fn clean_basename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    duplicate_marker_re().replace(&stem, "").into_owned()
}

/// Classifies a price-list filename. Never fails: anything unrecognised
/// becomes an `Unknown` make whose model is the basename itself.
pub fn parse_filename(filename: &str) -> FilenameMetadata {
    let basename = clean_basename(filename);
    let upper = basename.to_uppercase();

    let mut meta = FilenameMetadata {
        filename: filename.to_string(),
        basename: basename.clone(),
        make: Make::Unknown,
        model: basename.clone(),
        variant: None,
        model_year: None,
        validity_date: None,
    };

    let Some(rule) = RULES.iter().find(|rule| (rule.matches)(&upper, &basename)) else {
        return meta;
    };

    meta.make = rule.make;
    meta.model = (rule.model)(&upper).to_string();

    if rule.dated {
        if upper.contains("T7") {
            meta.variant = Some("T7".to_string());
        }
        meta.model_year = model_year_re()
            .captures(&basename)
            .map(|caps| caps[1].to_string());
        meta.validity_date = validity_date(&basename);
    }

    meta
}

/// Dotted `D.M.YYYY` wins; the undelimited `DDMMYYYY` form is only
/// consulted when no dotted date is present.
fn validity_date(basename: &str) -> Option<String> {
    if let Some(caps) = dotted_date_re().captures(basename) {
        return Some(format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[2], &caps[1]));
    }
    compact_date_re()
        .captures(basename)
        .map(|caps| format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dated_california_filename() {
        let meta = parse_filename("cenniky/Cennik_VW_California_T7_MJ2025_15.3.2025.pdf");
        assert_eq!(meta.make, Make::Volkswagen);
        assert_eq!(meta.model, "California");
        assert_eq!(meta.variant.as_deref(), Some("T7"));
        assert_eq!(meta.model_year.as_deref(), Some("2025"));
        assert_eq!(meta.validity_date.as_deref(), Some("2025-03-15"));
        assert_eq!(meta.basename, "Cennik_VW_California_T7_MJ2025_15.3.2025");
    }

    #[test]
    fn transit_is_ford_without_dates() {
        let meta = parse_filename("Transit_Custom_2024.pdf");
        assert_eq!(meta.make, Make::Ford);
        assert_eq!(meta.model, "Transit Custom");
        assert_eq!(meta.variant, None);
        assert_eq!(meta.model_year, None);
        assert_eq!(meta.validity_date, None);
    }

    #[test]
    fn california_keywords_are_case_insensitive() {
        for name in ["california.pdf", "CaLiFoRnIa_x.pdf", "ct7_ocean.pdf", "Cennik CT7.pdf"] {
            let meta = parse_filename(name);
            assert_eq!(meta.make, Make::Volkswagen, "{name}");
            assert_eq!(meta.model, "California", "{name}");
        }
    }

    #[test]
    fn dotted_date_beats_compact_run() {
        let meta = parse_filename("Multivan_01022024_5.6.2025.pdf");
        assert_eq!(meta.validity_date.as_deref(), Some("2025-06-05"));
    }

    #[test]
    fn compact_date_used_without_dotted_date() {
        let meta = parse_filename("Cennik_MT7_01022024.pdf");
        assert_eq!(meta.model, "Multivan");
        assert_eq!(meta.variant.as_deref(), Some("T7"));
        assert_eq!(meta.validity_date.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn strips_single_duplicate_marker() {
        assert_eq!(clean_basename("dir/Caravelle_2025 (1).pdf"), "Caravelle_2025");
        assert_eq!(clean_basename("Caravelle (1) (2).pdf"), "Caravelle (1)");
        assert_eq!(parse_filename("Caravelle (3).pdf").model, "Caravelle");
    }

    #[test]
    fn earlier_rule_wins_for_mixed_tokens() {
        let meta = parse_filename("Transporter_vs_Transit.pdf");
        assert_eq!(meta.make, Make::Volkswagen);
        assert_eq!(meta.model, "Transporter");

        let meta = parse_filename("Ford_vs_Vivaro.pdf");
        assert_eq!(meta.make, Make::Ford);
    }

    #[test]
    fn opel_sub_models() {
        assert_eq!(parse_filename("Vivaro_Van_2025.pdf").model, "Vivaro Van");
        assert_eq!(parse_filename("Vivaro_Combi.pdf").model, "Vivaro Combi");
        assert_eq!(parse_filename("Vivaro-e.pdf").model, "Vivaro");
        assert_eq!(parse_filename("Zafira_Life_MJ2025_1.1.2025.pdf").model, "Zafira Life");
    }

    #[test]
    fn non_volkswagen_branches_ignore_dates() {
        let meta = parse_filename("Zafira_Life_MJ2025_1.1.2025.pdf");
        assert_eq!(meta.make, Make::Opel);
        assert_eq!(meta.model_year, None);
        assert_eq!(meta.validity_date, None);
    }

    #[test]
    fn peugeot_and_toyota_sub_models() {
        assert_eq!(parse_filename("Expert_Traveller.pdf").model, "Expert Combi/Traveller");
        assert_eq!(parse_filename("Expert_Furgon.pdf").model, "Expert Furgon");
        assert_eq!(parse_filename("Expert.pdf").model, "Expert");
        assert_eq!(parse_filename("ProAce_Verso_EV.pdf").model, "ProAce Verso EV");
        assert_eq!(parse_filename("ProAce_Verso.pdf").model, "ProAce Verso");
        assert_eq!(parse_filename("ProAce_City.pdf").model, "ProAce");
        assert_eq!(parse_filename("ProAce_City.pdf").make, Make::Toyota);
    }

    #[test]
    fn citroen_triggers() {
        let meta = parse_filename("Space_Tourer_cennik.pdf");
        assert_eq!(meta.make, Make::Citroen);
        assert_eq!(meta.model, "SpaceTourer");

        let meta = parse_filename("citroen_jumpy_2025.pdf");
        assert_eq!(meta.make, Make::Citroen);
        assert_eq!(meta.model, "SpaceTourer");
    }

    #[test]
    fn unknown_keeps_basename_as_model() {
        let meta = parse_filename("cenniky/Renault_Trafic (2).pdf");
        assert_eq!(meta.make, Make::Unknown);
        assert_eq!(meta.model, "Renault_Trafic");
        assert_eq!(meta.validity_date, None);
    }
}
