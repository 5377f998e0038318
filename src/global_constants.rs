#![allow(dead_code)]

pub const APPLICATION_NAME: &str = "SVG Screenshot - Desktop";
pub const APPLICATION_TITLE: &str = "SVG Screenshot";

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";
pub const SVG_FILE_EXTENSION: &str = "svg";

pub const LOG_TAG_APP: &str = "[APP]";
pub const LOG_TAG_ORCHESTRATOR: &str = "[ORCHESTRATOR]";
pub const LOG_TAG_SELECTOR: &str = "[SELECTOR]";
pub const LOG_TAG_BUS: &str = "[BUS]";
pub const LOG_TAG_BACKGROUND: &str = "[BACKGROUND]";
pub const LOG_TAG_DISPATCH: &str = "[DISPATCH]";
pub const LOG_TAG_INLINER: &str = "[INLINER]";
pub const LOG_TAG_SETTINGS: &str = "[SETTINGS]";

pub const SETTINGS_DIR_NAME: &str = "svg-screenshot";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const SETTING_KEY_KEEP_LINKS: &str = "keepLinks";
pub const SETTING_KEY_INLINE_RESOURCES: &str = "inlineResources";
pub const SETTING_KEY_MINIFY: &str = "minifySvg";
pub const SETTING_KEY_PRETTY_PRINT: &str = "prettyPrintSvg";
pub const SETTING_KEY_OUTPUT_TARGET: &str = "target";

pub const OUTPUT_TARGET_DOWNLOAD: &str = "download";
pub const OUTPUT_TARGET_CLIPBOARD: &str = "clipboard";
pub const OUTPUT_TARGET_NEW_SURFACE: &str = "tab";

pub const PROXY_CHANNEL_CAPACITY: usize = 32;
pub const SELECTION_CHANNEL_CAPACITY: usize = 16;

pub const COPY_CONFIRMATION_DISMISS_MILLIS: u64 = 1500;

pub const TEMP_OBJECT_PREFIX: &str = "svg-screenshot";

pub const FORBIDDEN_FILENAME_CHARACTERS: &[char] =
    &['"', '\'', '/', '\\', ':', '?', '<', '>', '|'];

pub const STARTUP_BANNER: &str = r#"
╔════════════════════════════════════════════════════════╗
║  SVG Screenshot - Desktop                              ║
║                                                        ║
║  Captures the page document as a portable SVG image.   ║
║                                                        ║
║  Targets: download, clipboard, new surface             ║
║  Press Escape during selection to cancel               ║
║                                                        ║
╚════════════════════════════════════════════════════════╝
"#;
