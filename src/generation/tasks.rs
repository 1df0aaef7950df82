//! # Task Generation
//!
//! The default task factory: arithmetic questions that grow harder with the
//! room number, polynomial roots, digits of well-known constants, and plain
//! information lines.
//!
//! Generators retry their draws until the answer fits an `i32`. Each retry
//! consumes fresh draws, which keeps the draw sequence a pure function of the
//! seed.

use crate::utils::{factorial, gcd, multiply_complex, quadratic_coefficients, GameRng};
use crate::{GameContext, RoomId, Task, TaskFactory};
use log::trace;

/// Mathematical constants digit questions are asked about, in draw order.
pub const CONSTANTS: &[(&str, f64)] = &[
    ("Pi", std::f64::consts::PI),
    ("Euler's number e", std::f64::consts::E),
    ("the Golden Ratio Φ", 1.618_033_988_749_895),
    ("ln 2", std::f64::consts::LN_2),
    ("Pythagoras' constant √2", std::f64::consts::SQRT_2),
    ("Theodorus' constant √3", 1.732_050_807_568_877_2),
    ("the Euler-Mascheroni constant γ", 0.577_215_664_901_532_9),
];

/// Task factory drawing one of five task kinds uniformly.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTaskFactory;

impl TaskFactory for DefaultTaskFactory {
    fn create_task(&self, room_id: RoomId, context: &mut GameContext) -> Task {
        let rng = context.rng.as_mut();
        let kind = rng.next_int(5);
        trace!("Room {} gets task kind {}", room_id, kind);
        match kind {
            0 => simple_arithmetic_question(rng, room_id),
            1 => advanced_arithmetic_question(rng, room_id),
            2 => quadratic_root_question(rng, room_id),
            3 => digit_question(rng, room_id),
            _ => information(rng, &context.information_lines),
        }
    }
}

/// Upper bound for summands.
pub fn summand_limit(room_id: RoomId) -> i32 {
    room_id.saturating_add(1)
}

/// Upper bound for factors.
pub fn factor_limit(room_id: RoomId) -> i32 {
    (room_id as f64).sqrt().round() as i32 + 3
}

/// Upper bound for factorial arguments. 10! is the largest asked.
pub fn factorial_limit(room_id: RoomId) -> i32 {
    (factor_limit(room_id) / 2).min(11)
}

/// Upper bound for digit positions.
pub fn digit_limit(room_id: RoomId) -> i32 {
    ((room_id as f64) + 1.0).log10().round() as i32 + 1
}

fn signed(rng: &mut dyn GameRng, bound: i32) -> i32 {
    let value = rng.next_int(bound);
    if rng.next_bool() {
        -value
    } else {
        value
    }
}

/// One of addition, subtraction, multiplication, division or modulo.
pub fn simple_arithmetic_question(rng: &mut dyn GameRng, room_id: RoomId) -> Task {
    match rng.next_int(5) {
        0 => {
            let (a, b, sum) = loop {
                let a = signed(rng, summand_limit(room_id));
                let b = rng.next_int(summand_limit(room_id));
                if let Some(sum) = a.checked_add(b) {
                    break (a, b, sum);
                }
            };
            Task::question(format!("What is {a} + {b}?"), sum.to_string())
        }
        1 => {
            let (a, b, difference) = loop {
                let a = signed(rng, summand_limit(room_id));
                let b = rng.next_int(summand_limit(room_id));
                if let Some(difference) = a.checked_sub(b) {
                    break (a, b, difference);
                }
            };
            Task::question(format!("What is {a} - {b}?"), difference.to_string())
        }
        2 => {
            let (a, b, product) = loop {
                let a = signed(rng, factor_limit(room_id));
                let b = rng.next_int(factor_limit(room_id));
                if let Some(product) = a.checked_mul(b) {
                    break (a, b, product);
                }
            };
            Task::question(format!("What is {a} * {b}?"), product.to_string())
        }
        3 => {
            let (a, b, dividend) = loop {
                let a = signed(rng, factor_limit(room_id));
                let b = rng.next_int(factor_limit(room_id)).max(1);
                if let Some(dividend) = a.checked_mul(b) {
                    break (a, b, dividend);
                }
            };
            Task::question(format!("What is {dividend} / {b}?"), a.to_string())
        }
        _ => {
            let a = rng.next_int(summand_limit(room_id));
            let b = loop {
                let b = rng.next_int(factor_limit(room_id));
                if b != 0 {
                    break b;
                }
            };
            Task::question(format!("What is {a} mod {b}?"), (a % b).to_string())
        }
    }
}

/// One of square, square root, gcd, factorial or complex multiplication.
pub fn advanced_arithmetic_question(rng: &mut dyn GameRng, room_id: RoomId) -> Task {
    match rng.next_int(5) {
        0 => {
            let (a, square) = draw_square(rng, room_id);
            Task::question(format!("What is {a}²?"), square.to_string())
        }
        1 => {
            let (a, square) = draw_square(rng, room_id);
            Task::question(format!("What is √{square}?"), a.to_string())
        }
        2 => {
            let a = signed(rng, summand_limit(room_id));
            let b = signed(rng, summand_limit(room_id));
            Task::question(format!("What is gcd({a},{b})?"), gcd(a, b).to_string())
        }
        3 => {
            let a = rng.next_int(factorial_limit(room_id).max(1));
            let value = factorial(a).unwrap_or(1);
            Task::question(format!("What is {a}!?"), value.to_string())
        }
        _ => {
            let limit = factor_limit(room_id);
            let (a, b, c, d, (real, imaginary)) = loop {
                let a = signed(rng, limit);
                let b = signed(rng, limit);
                let c = signed(rng, limit);
                let d = signed(rng, limit);
                if let Some(product) = multiply_complex(a, b, c, d) {
                    break (a, b, c, d, product);
                }
            };
            Task::question(
                format!("What is ({a}{b:+}i) * ({c}{d:+}i)?"),
                format!("{real}{imaginary:+}i"),
            )
        }
    }
}

fn draw_square(rng: &mut dyn GameRng, room_id: RoomId) -> (i32, i32) {
    loop {
        let a = rng.next_int(factor_limit(room_id));
        if let Some(square) = a.checked_mul(a) {
            return (a, square);
        }
    }
}

/// Asks for the bigger or smaller root of a polynomial with integer roots.
pub fn quadratic_root_question(rng: &mut dyn GameRng, room_id: RoomId) -> Task {
    let factor = signed_at_least_one(rng, digit_limit(room_id));
    let (root1, root2, coefficients) = loop {
        let root1 = signed(rng, factor_limit(room_id));
        let root2 = signed(rng, factor_limit(room_id));
        if let Some(coefficients) = quadratic_coefficients(factor, root1, root2) {
            break (root1, root2, coefficients);
        }
    };
    let bigger = rng.next_bool();
    let (which, answer) = if bigger {
        ("bigger", root1.max(root2))
    } else {
        ("smaller", root1.min(root2))
    };
    Task::question(
        format!("What is the {which} root of {}?", format_polynomial(coefficients)),
        answer.to_string(),
    )
}

fn signed_at_least_one(rng: &mut dyn GameRng, bound: i32) -> i32 {
    let value = rng.next_int(bound.max(1)).max(1);
    if rng.next_bool() {
        -value
    } else {
        value
    }
}

/// Formats `ax² + bx + c`, dropping zero terms and unit leading factors.
pub fn format_polynomial([a, b, c]: [i32; 3]) -> String {
    let mut polynomial = match a {
        1 => String::new(),
        -1 => "-".to_string(),
        _ => a.to_string(),
    };
    polynomial.push_str("x²");
    if b != 0 {
        polynomial.push_str(&format!("{b:+}x"));
    }
    if c != 0 {
        polynomial.push_str(&format!("{c:+}"));
    }
    polynomial
}

/// Asks for the n-th digit of a constant, counting the leading digit as 1.
pub fn digit_question(rng: &mut dyn GameRng, room_id: RoomId) -> Task {
    let position = rng.next_int(digit_limit(room_id).max(1)).max(1);
    let (name, value) = CONSTANTS[rng.next_int(CONSTANTS.len() as i32) as usize];
    let digit = nth_digit(value, position);
    Task::question(
        format!("What is the {position}. digit of {name}?"),
        digit.to_string(),
    )
}

/// Digit at `position` of a constant in `(0, 10)`.
pub fn nth_digit(value: f64, position: i32) -> i64 {
    let scale = 10f64.powi(position - 1).round();
    (value * scale).floor() as i64 % 10
}

fn information(rng: &mut dyn GameRng, lines: &[String]) -> Task {
    match crate::utils::choose(rng, lines) {
        Some(line) => Task::information(line.clone()),
        None => Task::information("This room is empty."),
    }
}
