use qw_config::QwConfig;

/// Emit warnings for env keys that look like config overrides but were ignored.
pub fn warn_unconfigured(config: &QwConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

const SECTIONS: &[&str] = &["QUOTA", "REPAIR", "GENERATOR", "AUDIT", "STORE", "GENERAL"];

fn collect_unconfigured_warnings<I>(config: &QwConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut warnings = Vec::new();
    for (key, _) in env {
        let Some(rest) = key.strip_prefix("QUIZWRIGHT_") else {
            continue;
        };
        if rest == "LOG" || rest.contains("__") {
            continue;
        }
        if let Some(section) = SECTIONS.iter().find(|s| rest.starts_with(*s)) {
            let field = rest[section.len()..].trim_start_matches('_').to_ascii_uppercase();
            warnings.push(format!(
                "{key} is ignored. Use double underscores (example: QUIZWRIGHT_{section}__{field})."
            ));
        }
    }
    if config.generator.bank_dirs.iter().any(|d| d.trim().is_empty()) {
        warnings.push("generator.bank_dirs contains an empty path.".to_string());
    }
    warnings
}
