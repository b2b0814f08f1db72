#![cfg(test)]

use crate::trace;


pub(crate) fn reset_trace() {
    trace::clear().expect("couldn't clear the trace");
}

/// Drains the trace into display labels, which is what most assertions here
/// compare against.
pub(crate) fn drain() -> Vec<String> {
    trace::take()
        .expect("couldn't drain the trace")
        .iter()
        .map(ToString::to_string)
        .collect()
}

macro_rules! assert_trace {
    ($($label:literal),* $(,)?) => {{
        let expected: Vec<String> = vec![$($label.to_string()),*];
        assert_eq!(crate::tests::drain(), expected);
    }};
}

pub(crate) use assert_trace;
