/// Config sections that can be set through `DISCO_<SECTION>__<KEY>`.
const SECTIONS: [&str; 4] = ["SERVER", "DATABASE", "CLIENT", "WORKFLOW"];

/// Emit warnings for likely mistyped env var keys that silently fall back to defaults.
pub fn warn_unconfigured() {
    for warning in collect_unconfigured_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut keys = env
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with("DISCO_"))
        .collect::<Vec<_>>();
    keys.sort();

    let mut warnings = Vec::new();
    for section in SECTIONS {
        let single = format!("DISCO_{section}_");
        let double = format!("DISCO_{section}__");
        if let Some(key) = keys
            .iter()
            .find(|key| key.starts_with(&single) && !key.starts_with(&double))
        {
            let suggested = key.replacen(&single, &double, 1);
            warnings.push(format!(
                "{key} is ignored; {} config uses double underscores (example: {suggested}).",
                section.to_ascii_lowercase()
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::collect_unconfigured_warnings;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| ((*key).to_string(), "x".to_string()))
            .collect()
    }

    #[test]
    fn warns_for_single_underscore_section_keys() {
        let warnings = collect_unconfigured_warnings(env(&[
            "DISCO_SERVER_BIND",
            "DISCO_WORKFLOW_STRICT_TRANSITIONS",
        ]));

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("DISCO_SERVER__BIND"));
        assert!(warnings[1].contains("DISCO_WORKFLOW__STRICT_TRANSITIONS"));
    }

    #[test]
    fn does_not_warn_for_well_formed_or_unrelated_keys() {
        let warnings = collect_unconfigured_warnings(env(&[
            "DISCO_SERVER__BIND",
            "DISCO_CLIENT__BASE_URL",
            "DISCO_LOG",
            "DISCO_API_URL",
            "PATH",
        ]));

        assert!(warnings.is_empty());
    }
}
