/// Implements [`Debug`](std::fmt::Debug) without revealing any content.
#[macro_export]
macro_rules! sensitive_debug {
    ($ident:ident $(< $($param:ident),* >)?) => {
        impl $(< $($param),* >)? ::core::fmt::Debug for $ident $(< $($param),* >)? {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str("[sensitive]")
            }
        }
    };
}
