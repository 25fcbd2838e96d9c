/// Internal macro for common logging logic
#[macro_export]
#[doc(hidden)]
macro_rules! __internal_log_impl {
    // Timestamped file under CLIENTFORGE_LOG_DIR
    ($content:expr, standard) => {{
        let filename = format!("{}.log", $crate::__chrono::Local::now().format("%Y_%m_%d_%H_%M_%S"));
        $crate::__internal_log_impl!($content, filename, false, standard);
    }};

    ($content:expr, $filename:expr, $append:expr, standard) => {{
        // Logging is best effort; a missing directory variable disables it.
        if let Ok(logs_dir) = std::env::var("CLIENTFORGE_LOG_DIR") {
            $crate::__internal_log_impl!($content, logs_dir, $filename, $append, impl);
        }
    }};

    ($content:expr, $logs_dir:expr, $filename:expr, $append:expr, impl) => {{
        use std::io::Write;

        let _ = std::fs::create_dir_all(&$logs_dir);

        let path = std::path::Path::new(&$logs_dir).join(&$filename);

        let mut options = std::fs::OpenOptions::new();
        options.create(true);
        if $append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }

        if let Ok(mut file_handle) = options.open(&path) {
            let expr_str = stringify!($content);
            let formatted = if expr_str.starts_with("format!")
                || expr_str.starts_with("&format!")
                || expr_str.starts_with("\"")
                || expr_str.starts_with("String::")
            {
                format!("{}\n", $content)
            } else if $filename.ends_with(".ts") {
                // Generated sources are dumped verbatim
                format!("{}\n", $content)
            } else {
                let value_str = format!("{:#?}", &$content);
                if value_str.contains('\n') || value_str.len() > 80 {
                    format!(
                        "[{}:{}] {} = \n{}\n",
                        file!(),
                        line!(),
                        stringify!($content),
                        value_str
                    )
                } else {
                    format!(
                        "[{}:{}] {} = {}\n",
                        file!(),
                        line!(),
                        stringify!($content),
                        value_str
                    )
                }
            };
            let _ = file_handle.write_all(formatted.as_bytes());
        }
    }};
}

/// Dev-mode logging macro for clientforge.
///
/// Compiles to nothing unless the `dev-mode` feature is enabled. Output goes
/// to `$CLIENTFORGE_LOG_DIR`; nothing is written when the variable is unset.
///
/// ```no_run
/// # use clientforge_core::clientforge_log;
/// clientforge_log!("Generation started");
/// clientforge_log!(String::from("export type A = string"), "models_User.ts");
/// clientforge_log!("second pass", "passes.log", true);
/// ```
#[macro_export]
macro_rules! clientforge_log {
    ($content:expr) => {{
        #[cfg(feature = "dev-mode")]
        $crate::__internal_log_impl!($content, standard);
    }};
    ($content:expr, $filename:expr) => {{
        #[cfg(feature = "dev-mode")]
        $crate::__internal_log_impl!($content, $filename, false, standard);
    }};
    ($content:expr, $filename:expr, $append:expr) => {{
        #[cfg(feature = "dev-mode")]
        $crate::__internal_log_impl!($content, $filename, $append, standard);
    }};
}
