// puffin scopes, compiled out without the `profiler` feature

#[cfg(feature = "profiler")]
macro_rules! profile_function {
    ($($arg:expr)?) => {
        puffin::profile_function!($($arg)?);
    };
}

#[cfg(feature = "profiler")]
#[allow(unused_macros)]
macro_rules! profile_scope {
    ($id:expr $(,$arg:expr)?) => {
        puffin::profile_scope!($id $(,$arg)?);
    };
}

#[cfg(not(feature = "profiler"))]
macro_rules! profile_function {
    ($($arg:expr)?) => {};
}

#[cfg(not(feature = "profiler"))]
#[allow(unused_macros)]
macro_rules! profile_scope {
    ($id:expr $(,$arg:expr)?) => {};
}
