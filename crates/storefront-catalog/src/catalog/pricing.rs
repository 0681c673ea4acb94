//! Price and rating derivation for product cards.

use crate::catalog::product::{Discount, DiscountKind, Review};

/// Price after discount, always within `[0, base]`.
///
/// A discount with a zero (or non-finite) value is ignored. Percentage
/// discounts take `base * value / 100` off; flat discounts subtract the
/// value and stop at zero.
pub fn effective_price(base: f64, discount: Option<&Discount>) -> f64 {
    let base = sanitize_price(base);
    let Some(discount) = discount.filter(|d| applies(d)) else {
        return base;
    };

    let discounted = match discount.kind {
        DiscountKind::Percentage => base - (base * discount.value / 100.0),
        DiscountKind::Flat => (base - discount.value).max(0.0),
    };

    discounted.clamp(0.0, base)
}

/// Whether a discount changes the price at all.
pub fn applies(discount: &Discount) -> bool {
    discount.value.is_finite() && discount.value != 0.0
}

/// Mean review rating rounded half-up to one decimal; 0.0 with no reviews.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: f64 = reviews.iter().map(|r| r.rating).sum();
    round_to_tenth(total / reviews.len() as f64)
}

/// Round half-up to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

/// Negative and non-finite prices count as zero.
pub fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_discount() {
        assert_eq!(effective_price(1000.0, Some(&Discount::percentage(20.0))), 800.0);
    }

    #[test]
    fn test_flat_discount_clamped_to_zero() {
        assert_eq!(effective_price(1000.0, Some(&Discount::flat(1500.0))), 0.0);
    }

    #[test]
    fn test_flat_discount() {
        assert_eq!(effective_price(450.0, Some(&Discount::flat(50.0))), 400.0);
    }

    #[test]
    fn test_zero_discount_ignored() {
        assert_eq!(effective_price(300.0, Some(&Discount::percentage(0.0))), 300.0);
        assert_eq!(effective_price(300.0, None), 300.0);
    }

    #[test]
    fn test_out_of_range_discounts_clamped() {
        assert_eq!(effective_price(100.0, Some(&Discount::percentage(150.0))), 0.0);
        assert_eq!(effective_price(100.0, Some(&Discount::percentage(-10.0))), 100.0);
        assert_eq!(effective_price(100.0, Some(&Discount::flat(-10.0))), 100.0);
    }

    #[test]
    fn test_negative_base_is_zero() {
        assert_eq!(effective_price(-5.0, None), 0.0);
        assert_eq!(effective_price(f64::NAN, None), 0.0);
    }

    #[test]
    fn test_average_rating() {
        let reviews: Vec<Review> = [4.0, 5.0, 4.0].into_iter().map(Review::with_rating).collect();
        assert_eq!(average_rating(&reviews), 4.3);
    }

    #[test]
    fn test_average_rating_half_up() {
        let reviews: Vec<Review> = [4.0, 4.5].into_iter().map(Review::with_rating).collect();
        assert_eq!(average_rating(&reviews), 4.3);
    }

    #[test]
    fn test_average_rating_empty() {
        assert_eq!(average_rating(&[]), 0.0);
    }
}
