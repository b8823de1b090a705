pub trait StrExt {
    /// Trimmed, with `/` and `.` date separators turned into `-`.
    fn to_dash_separators(&self) -> String;

    /// Trimmed copy, or `None` if only whitespace was there.
    fn non_blank(&self) -> Option<String>;
}

impl StrExt for str {
    fn to_dash_separators(&self) -> String {
        self.trim().replace(['/', '.'], "-")
    }

    fn non_blank(&self) -> Option<String> {
        match self.trim() {
            "" => None,
            trimmed => Some(trimmed.to_string()),
        }
    }
}
