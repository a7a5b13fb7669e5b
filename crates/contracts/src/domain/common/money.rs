/// Rounds a monetary amount to 2 decimals (kopecks/cents).
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(10.005_1), 10.01);
        assert_eq!(round_money(99.994), 99.99);
        assert_eq!(round_money(0.0), 0.0);
    }
}
