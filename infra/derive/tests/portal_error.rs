#[test]
fn portal_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/portal_error_pass.rs");
    t.compile_fail("tests/ui/portal_error_no_context.rs");
    t.compile_fail("tests/ui/portal_error_bad_context_type.rs");
    t.compile_fail("tests/ui/portal_error_tuple_variant.rs");
    t.compile_fail("tests/ui/portal_error_struct.rs");
}
