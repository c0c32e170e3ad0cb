/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took to evaluate, and then evaluates to the
/// expression's value. Logs at debug level unless a level is given.
///
/// ```
/// let sum = tilegrid::timed!("Summing", (0..100).sum::<u32>());
/// assert_eq!(sum, 4950);
/// ```
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_timed_passes_value_through() {
        let value = timed!("Test", log::Level::Info, 3 + 4);
        assert_eq!(value, 7);
    }
}
