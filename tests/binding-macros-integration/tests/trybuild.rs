//! trybuild compile-time tests for binding_macros

#[test]
fn trybuild_bind_to() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/bind_to_ok.rs");
}
