pub mod query;
pub mod query_times;

/// Determines the colorbrewer scheme: an explicit `--color` wins,
/// otherwise one color per experiment plus one spare, floored at the
/// smallest spectral scheme.
pub(crate) fn color_scheme(color: &Option<String>, experiment_count: usize) -> String {
    match color {
        Some(scheme) => scheme.clone(),
        None => format!("Spectral-{}", std::cmp::max(3, experiment_count + 1)),
    }
}

/// Joins display names into a TikZ legend list, escaping underscores.
pub(crate) fn legend_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| name.replace('_', "\\_"))
        .collect::<Vec<_>>()
        .join(",")
}
