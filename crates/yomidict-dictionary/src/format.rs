use yomidict_config::SaveConfig;

/// Shorten large counts: `2M` from one million, `1K` from one thousand
pub fn abbreviate(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{}M", value / 1_000_000)
    } else if value >= 1_000 {
        format!("{}K", value / 1_000)
    } else {
        value.to_string()
    }
}

fn render_count(value: u64, abbreviated: bool) -> String {
    if abbreviated {
        abbreviate(value)
    } else {
        value.to_string()
    }
}

/// Annotation shown next to a term, e.g. ` 1 F: 2 %: 50.00`
///
/// `presence` is the token's document fraction; a missing value counts as 0%.
pub fn annotation(
    rank: usize,
    frequency: u64,
    presence: Option<f64>,
    options: &SaveConfig,
) -> String {
    let mut text = format!(
        " {} F: {}",
        render_count(rank as u64, options.rank_abbreviated()),
        render_count(frequency, options.frequency_abbreviated()),
    );
    if options.include_presence {
        text.push_str(&format!(" %: {:.2}", presence.unwrap_or(0.0) * 100.0));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_thresholds() {
        assert_eq!(abbreviate(999), "999");
        assert_eq!(abbreviate(1_000), "1K");
        assert_eq!(abbreviate(1_500), "1K");
        assert_eq!(abbreviate(999_999), "999K");
        assert_eq!(abbreviate(2_500_000), "2M");
    }

    #[test]
    fn presence_percentage_has_two_decimals() {
        let options = SaveConfig::default();
        assert_eq!(annotation(1, 2, Some(0.5), &options), " 1 F: 2 %: 50.00");
        assert_eq!(annotation(3, 1, None, &options), " 3 F: 1 %: 0.00");
    }

    #[test]
    fn rank_and_frequency_only() {
        let options = SaveConfig {
            include_presence: false,
            ..SaveConfig::default()
        };
        assert_eq!(annotation(1500, 2_500_000, Some(1.0), &options), " 1500 F: 2500000");
    }

    #[test]
    fn abbreviation_switches() {
        let frequency_only = SaveConfig {
            include_presence: false,
            abbreviate_frequency: true,
            ..SaveConfig::default()
        };
        assert_eq!(annotation(1500, 2_500_000, None, &frequency_only), " 1500 F: 2M");

        let everything = SaveConfig {
            include_presence: false,
            abbreviate_all: true,
            ..SaveConfig::default()
        };
        assert_eq!(annotation(1500, 2_500_000, None, &everything), " 1K F: 2M");
    }
}
