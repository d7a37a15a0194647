use crate::features::error::FeatureError;

const MAX_DIGITS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '−',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    fn apply(&self, lhs: f64, rhs: f64) -> Option<f64> {
        let value = match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide if rhs == 0.0 => return None,
            Operator::Divide => lhs / rhs,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Point,
    Op(Operator),
    Equals,
    Percent,
    Negate,
    Clear,
    Backspace,
}

/// Immediate-execution keypad: each operator applies the pending one first,
/// so `2 + 3 × 4 =` shows 20, like a pocket calculator.
#[derive(Debug, Clone)]
pub struct Calculator {
    display: String,
    accumulator: Option<f64>,
    pending: Option<Operator>,
    /// The next digit replaces the display instead of extending it.
    fresh_input: bool,
    /// The display holds an operand entered since the last operator.
    operand: bool,
    error: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            accumulator: None,
            pending: None,
            fresh_input: true,
            operand: false,
            error: false,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn pending(&self) -> Option<Operator> {
        self.pending
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    fn current(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    fn show(&mut self, value: f64) {
        self.display = format_number(value);
    }

    fn fail(&mut self) {
        *self = Self::default();
        self.display = "Error".to_string();
        self.error = true;
    }

    pub fn press(&mut self, key: Key) {
        if self.error && !matches!(key, Key::Digit(_) | Key::Point | Key::Clear) {
            return;
        }
        match key {
            Key::Digit(d) => {
                if self.error {
                    *self = Self::default();
                }
                let d = char::from(b'0' + d.min(9));
                if self.fresh_input || self.display == "0" {
                    self.display = d.to_string();
                    self.fresh_input = false;
                } else if self.display.len() < MAX_DIGITS {
                    self.display.push(d);
                }
                self.operand = true;
            }
            Key::Point => {
                if self.error {
                    *self = Self::default();
                }
                if self.fresh_input {
                    self.display = "0.".to_string();
                    self.fresh_input = false;
                } else if !self.display.contains('.') {
                    self.display.push('.');
                }
                self.operand = true;
            }
            Key::Op(op) => {
                if let (Some(acc), Some(prev), true) = (self.accumulator, self.pending, self.operand) {
                    match prev.apply(acc, self.current()) {
                        Some(v) => {
                            self.show(v);
                            self.accumulator = Some(v);
                        }
                        None => return self.fail(),
                    }
                } else if self.pending.is_none() || self.operand {
                    self.accumulator = Some(self.current());
                }
                self.pending = Some(op);
                self.fresh_input = true;
                self.operand = false;
            }
            Key::Equals => {
                if let (Some(acc), Some(op)) = (self.accumulator, self.pending) {
                    match op.apply(acc, self.current()) {
                        Some(v) => self.show(v),
                        None => return self.fail(),
                    }
                    self.accumulator = None;
                    self.pending = None;
                    self.fresh_input = true;
                }
            }
            Key::Percent => {
                let v = self.current() / 100.0;
                self.show(v);
                self.fresh_input = true;
            }
            Key::Negate => {
                if let Some(stripped) = self.display.strip_prefix('-') {
                    self.display = stripped.to_string();
                } else if self.display != "0" {
                    self.display.insert(0, '-');
                }
            }
            Key::Clear => *self = Self::default(),
            Key::Backspace => {
                if !self.fresh_input {
                    self.display.pop();
                    if self.display.is_empty() || self.display == "-" {
                        self.display = "0".to_string();
                    }
                }
            }
        }
    }
}

/// Integers without a decimal point, everything else trimmed to ten places.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let s = format!("{:.10}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Run a typed expression through the keypad and press `=` at the end.
///
/// Accepts digits, `.`, `+ - * / x × ÷ %` and whitespace.
pub fn evaluate(expr: &str) -> Result<String, FeatureError> {
    let mut calc = Calculator::new();
    for c in expr.chars() {
        let key = match c {
            '0'..='9' => Key::Digit(c as u8 - b'0'),
            '.' => Key::Point,
            '+' => Key::Op(Operator::Add),
            '-' | '−' => Key::Op(Operator::Subtract),
            '*' | 'x' | 'X' | '×' => Key::Op(Operator::Multiply),
            '/' | '÷' => Key::Op(Operator::Divide),
            '%' => Key::Percent,
            '=' => Key::Equals,
            c if c.is_whitespace() => continue,
            other => return Err(FeatureError::InvalidExpression(other.to_string())),
        };
        calc.press(key);
    }
    calc.press(Key::Equals);
    Ok(calc.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(keys: &[Key]) -> Calculator {
        let mut calc = Calculator::new();
        for k in keys {
            calc.press(*k);
        }
        calc
    }

    #[test]
    fn basic_arithmetic() {
        assert_eq!(evaluate("12 + 30").unwrap(), "42");
        assert_eq!(evaluate("7 - 10").unwrap(), "-3");
        assert_eq!(evaluate("6 × 7").unwrap(), "42");
        assert_eq!(evaluate("1 / 4").unwrap(), "0.25");
        assert_eq!(evaluate("0.1 + 0.2").unwrap(), "0.3");
    }

    #[test]
    fn chains_left_to_right() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), "20");
        assert_eq!(evaluate("100 / 8 - 0.5").unwrap(), "12");
    }

    #[test]
    fn changing_operator_before_second_operand() {
        assert_eq!(evaluate("9 + * 3").unwrap(), "27");
    }

    #[test]
    fn division_by_zero_shows_error_until_new_input() {
        let mut calc = run(&[Key::Digit(5), Key::Op(Operator::Divide), Key::Digit(0), Key::Equals]);
        assert!(calc.is_error());
        assert_eq!(calc.display(), "Error");

        calc.press(Key::Op(Operator::Add));
        assert_eq!(calc.display(), "Error");

        calc.press(Key::Digit(4));
        assert!(!calc.is_error());
        assert_eq!(calc.display(), "4");
    }

    #[test]
    fn percent_negate_backspace() {
        let calc = run(&[Key::Digit(5), Key::Digit(0), Key::Percent]);
        assert_eq!(calc.display(), "0.5");

        let calc = run(&[Key::Digit(5), Key::Digit(0), Key::Percent, Key::Digit(5)]);
        assert_eq!(calc.display(), "5");
        assert_eq!(evaluate("50 % 5").unwrap(), "5");
        assert_eq!(evaluate("10 + 50 % * 2").unwrap(), "21");

        let calc = run(&[Key::Digit(8), Key::Negate]);
        assert_eq!(calc.display(), "-8");

        let calc = run(&[Key::Digit(1), Key::Digit(2), Key::Backspace, Key::Backspace]);
        assert_eq!(calc.display(), "0");

        let calc = run(&[Key::Point, Key::Point, Key::Digit(5)]);
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            evaluate("2 ^ 3").unwrap_err(),
            FeatureError::InvalidExpression("^".into())
        );
    }
}
