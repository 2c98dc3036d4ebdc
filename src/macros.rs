// Forward to `tracing` when the feature is enabled, expand to nothing otherwise.

macro_rules! cfg_tracing {
    ($($item:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            $($item)*
        }
    };
}
