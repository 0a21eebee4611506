/// Everything after the last `_`, or the whole name if there is none.
fn trailing_token(identifier: &str) -> &str {
    match identifier.rfind('_') {
        Some(idx) => &identifier[idx + 1..],
        None => identifier,
    }
}

/// Interval index used for ordering: the trailing token cut at the first
/// `.`, parsed as an integer. `None` when it is not a plain integer.
pub fn interval_index(identifier: &str) -> Option<i64> {
    let token = trailing_token(identifier);
    let stem = token.split('.').next().unwrap_or(token);
    stem.trim().parse().ok()
}

/// Center point of the interval used for joining against sample weights:
/// median of every digit run in the trailing token. `core_4-6.pdf` spans 4
/// to 6 and is centered on 5.
pub fn interval_center(identifier: &str) -> Option<f64> {
    let numbers: Vec<f64> = digit_runs(trailing_token(identifier))
        .filter_map(|run| run.parse::<f64>().ok())
        .collect();
    median(numbers)
}

fn digit_runs(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
}

/// Median of a sample, averaging the two middle values for even counts.
pub fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
