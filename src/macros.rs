// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Single expression → String::from
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
    // Format string with args → format!
    ($fmt:literal, $($arg:tt)+) => {
        ::std::format!($fmt, $($arg)+)
    };
}

#[macro_export]
macro_rules! rule {
    // Horizontal rule of `n` repeated chars, for text reports.
    ($ch:expr, $n:expr) => {
        ::std::iter::repeat($ch).take($n).collect::<::std::string::String>()
    };
}
