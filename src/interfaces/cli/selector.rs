use crate::domain::method::PaymentMethod;
use std::io::{BufRead, Write};

/// One of the three rendered choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub method: PaymentMethod,
    pub label: &'static str,
    pub selected: bool,
}

/// A stateless payment-method picker.
///
/// The current selection is supplied by the caller; choosing a method only
/// reports the token through the callback and never mutates the selector
/// itself. While disabled, choosing is a no-op.
pub struct MethodSelector<F: FnMut(PaymentMethod)> {
    selection: Option<PaymentMethod>,
    disabled: bool,
    on_change: F,
}

impl<F: FnMut(PaymentMethod)> MethodSelector<F> {
    pub fn new(selection: Option<PaymentMethod>, disabled: bool, on_change: F) -> Self {
        Self {
            selection,
            disabled,
            on_change,
        }
    }

    /// The three choices in fixed order. At most one is marked selected;
    /// none is when the caller-supplied selection matches no choice.
    pub fn choices(&self) -> [Choice; 3] {
        PaymentMethod::ALL.map(|method| Choice {
            method,
            label: method.label(),
            selected: self.selection == Some(method),
        })
    }

    /// Reports `method` through the callback. No-op while disabled.
    pub fn select(&mut self, method: PaymentMethod) {
        if self.disabled {
            return;
        }
        (self.on_change)(method);
    }

    /// Writes the numbered choice list, marking the selected entry.
    pub fn render_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writeln!(writer, "Payment Method")?;
        for (index, choice) in self.choices().iter().enumerate() {
            let marker = if choice.selected { "*" } else { " " };
            writeln!(writer, "  [{}] ({}) {}", index + 1, marker, choice.label)?;
        }
        Ok(())
    }

    /// Renders the choices, reads one line, and selects the matching method.
    /// Accepts the choice number or the literal method token; anything else
    /// selects nothing.
    pub fn prompt(&mut self, reader: &mut impl BufRead, writer: &mut impl Write) -> std::io::Result<()> {
        self.render_to(writer)?;
        write!(writer, "> ")?;
        writer.flush()?;

        let mut line = String::new();
        reader.read_line(&mut line)?;
        let input = line.trim();

        let method = match input {
            "1" => Some(PaymentMethod::Card),
            "2" => Some(PaymentMethod::Crypto),
            "3" => Some(PaymentMethod::Mpesa),
            other => other.parse().ok(),
        };
        match method {
            Some(method) => self.select(method),
            None => writeln!(writer, "Unrecognized choice: {input:?}")?,
        }
        Ok(())
    }
}
