use crate::domain::time;

/// A parsed item that can enter the enrichment stage.
pub trait Record: Clone + Send + Sync + 'static {
    /// Stable identifier, used as the enrichment key.
    fn record_id(&self) -> &str;

    /// Link to the external resource whose metadata is fetched.
    fn direct_url(&self) -> &str;

    /// Raw timestamp as extracted from the page.
    fn time_raw(&self) -> &str;

    /// Timestamp as seconds since the epoch, 0 when unparseable.
    fn time_value(&self) -> f64 {
        time::numeric_time(self.time_raw())
    }
}
