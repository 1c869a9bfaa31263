#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Summary {
    pub(crate) count: usize,
    pub(crate) min: i64,
    pub(crate) max: i64,
    pub(crate) mean: f64,
}

impl Summary {
    /// Returns `None` for an empty slice.
    pub(crate) fn of(data: &[i64]) -> Option<Summary> {
        let (&first, rest) = data.split_first()?;
        let (min, max, sum) = rest.iter().fold(
            (first, first, i128::from(first)),
            |(min, max, sum), &x| (min.min(x), max.max(x), sum + i128::from(x)),
        );
        Some(Summary {
            count: data.len(),
            min,
            max,
            mean: sum as f64 / data.len() as f64,
        })
    }

    pub(crate) fn mean_display(&self) -> String {
        format!("{:.2}", self.mean)
    }
}

/// Logs count, min, max and mean of `data`, or a warning if it is empty.
pub(crate) fn report(data: &[i64]) -> Option<Summary> {
    let summary = match Summary::of(data) {
        Some(s) => s,
        None => {
            tracing::warn!("no data to analyze");
            return None;
        }
    };
    tracing::info!("count: {}", summary.count);
    tracing::info!("min: {}", summary.min);
    tracing::info!("max: {}", summary.max);
    tracing::info!("mean: {}", summary.mean_display());
    Some(summary)
}
