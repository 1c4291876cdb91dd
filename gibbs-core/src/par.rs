/// Map `$f` over the indices `0..$n`, collecting into a Vec in index order.
/// Runs on the rayon pool when the `parallel` feature is on.
macro_rules! par_map_indices {
    ($n:expr, $f:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IntoParallelIterator, ParallelIterator};
            (0..$n).into_par_iter().map($f).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            (0..$n).map($f).collect()
        }
    }};
}
