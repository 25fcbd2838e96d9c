/// Line terminator used when stringifying builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewLine {
    #[default]
    Lf,
    CrLf,
}

impl NewLine {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewLine::Lf => "\n",
            NewLine::CrLf => "\r\n",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringifyOptions {
    /// Indentation the output starts at, in levels of two spaces.
    pub indent_level: usize,
    pub new_line: NewLine,
}

/// Anything that can print itself as TypeScript source.
pub trait BasicBuilder {
    fn write(&self, writer: &mut Writer);
}

impl<T: BasicBuilder + ?Sized> BasicBuilder for Box<T> {
    fn write(&self, writer: &mut Writer) {
        (**self).write(writer)
    }
}

impl<T: BasicBuilder + ?Sized> BasicBuilder for &T {
    fn write(&self, writer: &mut Writer) {
        (**self).write(writer)
    }
}

const INDENT: &str = "  ";

/// Indentation-aware string sink.
///
/// Indentation is emitted lazily at the first character of a line, so empty
/// lines never carry trailing whitespace.
#[derive(Debug)]
pub struct Writer {
    output: String,
    indent_level: usize,
    new_line: NewLine,
    at_line_start: bool,
}

impl Writer {
    pub fn new(options: StringifyOptions) -> Self {
        Self {
            output: String::new(),
            indent_level: options.indent_level,
            new_line: options.new_line,
            at_line_start: true,
        }
    }

    /// Appends text, honouring embedded `\n` as line breaks.
    pub fn write(&mut self, text: &str) -> &mut Self {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.write_fragment(first);
        }
        for line in lines {
            self.new_line();
            self.write_fragment(line);
        }
        self
    }

    fn write_fragment(&mut self, fragment: &str) {
        let fragment = fragment.strip_suffix('\r').unwrap_or(fragment);
        if fragment.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(INDENT);
            }
            self.at_line_start = false;
        }
        self.output.push_str(fragment);
    }

    pub fn write_builder(&mut self, builder: &(impl BasicBuilder + ?Sized)) -> &mut Self {
        builder.write(self);
        self
    }

    pub fn new_line(&mut self) -> &mut Self {
        self.output.push_str(self.new_line.as_str());
        self.at_line_start = true;
        self
    }

    pub fn write_line(&mut self, text: &str) -> &mut Self {
        self.write(text).new_line()
    }

    /// Ends the current line unless nothing was written on it yet.
    pub fn ensure_new_line(&mut self) -> &mut Self {
        if !self.at_line_start {
            self.new_line();
        }
        self
    }

    pub fn with_indent(&mut self, body: impl FnOnce(&mut Writer)) -> &mut Self {
        self.indent_level += 1;
        body(self);
        self.indent_level -= 1;
        self
    }

    pub fn write_joined<'a, T, I>(&mut self, separator: &str, items: I) -> &mut Self
    where
        T: BasicBuilder + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for (idx, item) in items.into_iter().enumerate() {
            if idx > 0 {
                self.write(separator);
            }
            item.write(self);
        }
        self
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// Renders a builder to a string.
pub fn stringify(builder: &(impl BasicBuilder + ?Sized), options: StringifyOptions) -> String {
    let mut writer = Writer::new(options);
    builder.write(&mut writer);
    writer.finish()
}

/// Plain text inserted verbatim, one writer line per source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw(pub String);

impl Raw {
    pub fn new(text: impl Into<String>) -> Self {
        Raw(text.into())
    }
}

impl BasicBuilder for Raw {
    fn write(&self, writer: &mut Writer) {
        writer.write(&self.0);
    }
}
