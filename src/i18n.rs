// ==========================================
// Localization module
// ==========================================
// rust-i18n with Norwegian bokmål (default)
// and English report texts
// ==========================================
// Note: the rust_i18n::i18n! macro is
// initialized in lib.rs
// ==========================================

/// Current locale code.
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Switch locale.
///
/// # Arguments
/// - locale: language code ("nb" or "en")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translate a message without arguments.
///
/// # Example
/// ```no_run
/// use labstock::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate a message with named arguments.
///
/// # Example
/// ```no_run
/// use labstock::i18n::t_with_args;
/// let msg = t_with_args("import.no_header", &[("window", "10")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The rust-i18n locale is global state and Rust runs tests in
    // parallel; serialize the locale-dependent tests.
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("nb");
        assert_eq!(current_locale(), "nb");
    }

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("nb");
        assert_eq!(current_locale(), "nb");

        set_locale("en");
        assert_eq!(current_locale(), "en");

        set_locale("nb");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("nb");
        let msg = t("common.success");
        assert_eq!(msg, "Operasjonen var vellykket");

        set_locale("en");
        let msg = t("common.success");
        assert_eq!(msg, "Operation successful");

        set_locale("nb");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("nb");
        let msg = t_with_args("import.no_header", &[("window", "10")]);
        assert!(msg.contains("10"));

        set_locale("en");
        let msg = t_with_args("import.no_header", &[("window", "10")]);
        assert!(msg.contains("10"));
        assert!(msg.contains("No header row"));

        set_locale("nb");
    }
}
