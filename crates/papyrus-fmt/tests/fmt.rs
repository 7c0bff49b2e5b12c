use papyrus_fmt::{format_source, OutputOptions};

fn format(src: &str) -> String {
    let (formatted, log) = format_source("test.psc", src, &OutputOptions::default());
    assert!(log.is_empty(), "unexpected diagnostics: {log:?}");
    formatted
}

#[test]
fn fmt_smoke() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let out = format("ScriptName Quest1 extends Quest\r\n\r\nInt Property Stage = 0 Auto\r\n");
    assert!(out.starts_with("ScriptName Quest1 extends Quest"));
    assert!(out.contains("Int Property Stage = 0 Auto"));
}

#[test]
fn fmt_function_with_control_flow() {
    let src = "ScriptName Quest1\r\n\r\nFunction Run()\r\n\tIf Stage > 0\r\n\t\tReturn\r\n\tEndIf\r\n\tInt i = 0\r\n\tWhile i < 3\r\n\t\ti += 1\r\n\tEndWhile\r\nEndFunction\r\n";
    let out = format(src);
    assert!(out.contains("Function Run()"));
    assert!(out.contains("If Stage > 0"));
    assert!(out.contains("EndIf"));
    assert!(out.contains("While i < 3"));
    assert!(out.contains("i += 1"));
    assert!(out.contains("EndWhile"));
    assert!(out.trim_end().ends_with("EndFunction"));
}

#[test]
fn fmt_preserves_comments() {
    let src = "ScriptName Quest1 {A doc comment}\r\n\r\n; a leading comment\r\nInt Property Stage = 0 Auto ; trailing\r\n";
    let out = format(src);
    assert!(out.contains("{A doc comment}"));
    assert!(out.contains("; a leading comment"));
    assert!(out.contains("; trailing"));
}

#[test]
fn fmt_tabs_option() {
    let (formatted, log) = format_source(
        "test.psc",
        "ScriptName Quest1\r\n\r\nFunction Run()\r\n\tInt a = 1\r\nEndFunction\r\n",
        &OutputOptions {
            use_tabs: true,
            ..OutputOptions::default()
        },
    );
    assert!(log.is_empty());
    assert!(formatted.contains("\tInt a = 1"));
}

#[test]
fn fmt_unix_line_endings_default_is_crlf() {
    let out = format("ScriptName Quest1\r\n");
    assert!(out.contains('\r'));
}

#[test]
fn fmt_adjacent_property_overloads_have_no_blank_line_between() {
    let src = "ScriptName Quest1\r\n\r\nInt Property Stage = 0 Auto\r\nBool Property Done = false Auto\r\n";
    let out = format(src);
    assert!(
        out.contains("Int Property Stage = 0 Auto\r\nBool Property Done = false Auto"),
        "adjacent properties should not be separated by a blank line: {out:?}"
    );
}

#[test]
fn fmt_property_then_function_keeps_one_blank_line() {
    let src = "ScriptName Quest1\r\n\r\nInt Property Stage = 0 Auto\r\n\r\nFunction Run()\r\nEndFunction\r\n";
    let out = format(src);
    assert!(
        out.contains("Int Property Stage = 0 Auto\r\n\r\nFunction Run()"),
        "a property followed by a non-property member should keep a blank line: {out:?}"
    );
}

#[test]
fn fmt_calls_and_params_with_more_than_one_argument_do_not_log_diagnostics() {
    let (_, log) = papyrus_fmt::format_source(
        "test.psc",
        "ScriptName Quest1\r\n\r\nFunction Add(Int a, Int b, Int c)\r\n\tSelf.Add(a, b, c)\r\nEndFunction\r\n",
        &OutputOptions::default(),
    );
    assert!(log.is_empty(), "unexpected diagnostics: {log:?}");
}
