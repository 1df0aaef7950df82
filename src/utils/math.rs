//! # Game Mathematics
//!
//! Number-theory helpers used by task and reward generation.
//!
//! Everything here is a pure function of its arguments. There are no caches,
//! so two dungeons running side by side never observe each other's lookups.

/// Checks if a number is prime.
///
/// A number is prime if it has exactly two distinct positive divisors.
/// Negative numbers are checked by their absolute value.
///
/// # Examples
///
/// ```
/// use delve::utils::is_prime;
///
/// assert!(is_prime(2));
/// assert!(is_prime(-37));
/// assert!(!is_prime(1));
/// assert!(!is_prime(100));
/// ```
pub fn is_prime(n: i32) -> bool {
    let n = (n as i64).abs();
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Checks if a number is a Fibonacci number (1, 1, 2, 3, 5, 8, ...).
///
/// Zero and negative numbers are never Fibonacci numbers here.
pub fn is_fibonacci(n: i32) -> bool {
    if n < 1 {
        return false;
    }
    let (mut previous, mut current) = (1i32, 1i32);
    while current < n {
        match previous.checked_add(current) {
            Some(next) => {
                previous = current;
                current = next;
            }
            None => return false,
        }
    }
    current == n
}

/// Greatest common divisor, always positive.
///
/// `gcd(0, 0)` is defined as `i32::MAX`.
pub fn gcd(a: i32, b: i32) -> i32 {
    if a == 0 && b == 0 {
        return i32::MAX;
    }
    let (mut x, mut y) = ((a as i64).abs(), (b as i64).abs());
    while y != 0 {
        let remainder = x % y;
        x = y;
        y = remainder;
    }
    // |i32::MIN| only survives when the other operand is 0 or i32::MIN
    x.min(i32::MAX as i64) as i32
}

/// Calculates `n!`, ignoring overflow.
///
/// Returns `None` for negative `n`.
pub fn factorial(n: i32) -> Option<i32> {
    if n < 0 {
        return None;
    }
    Some((2..=n).fold(1i32, |acc, k| acc.wrapping_mul(k)))
}

/// Returns the coefficients `[a, b, c]` of `ax² + bx + c` given as
/// `factor * (x - root1) * (x - root2)`.
///
/// Returns `None` if any coefficient overflows.
pub fn quadratic_coefficients(factor: i32, root1: i32, root2: i32) -> Option<[i32; 3]> {
    let b = factor.checked_neg()?.checked_mul(root1.checked_add(root2)?)?;
    let c = factor.checked_mul(root1.checked_mul(root2)?)?;
    Some([factor, b, c])
}

/// Multiplies `(a + bi) * (c + di)`.
///
/// Returns the real and imaginary part, or `None` on overflow.
pub fn multiply_complex(a: i32, b: i32, c: i32, d: i32) -> Option<(i32, i32)> {
    let real = a.checked_mul(c)?.checked_sub(b.checked_mul(d)?)?;
    let imaginary = a.checked_mul(d)?.checked_add(b.checked_mul(c)?)?;
    Some((real, imaginary))
}
