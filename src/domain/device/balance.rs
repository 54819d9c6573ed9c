//! Read-side billing totals for a device

use crate::domain::repair_item::RepairItem;
use crate::domain::transaction::Transaction;

/// Totals shown with every device response. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceBalance {
    /// Sum of repair item costs; items without a cost count as zero
    pub repair_subtotal: i64,
    /// `repair_subtotal` minus the latest payment, floored at zero
    pub outstanding_amount: i64,
}

impl DeviceBalance {
    pub fn compute(items: &[RepairItem], latest_payment: Option<&Transaction>) -> Self {
        let repair_subtotal: i64 = items.iter().filter_map(|i| i.cost).sum();
        let paid = latest_payment.map(|t| t.final_amount).unwrap_or(0);
        Self {
            repair_subtotal,
            outstanding_amount: (repair_subtotal - paid).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::PaymentMethod;

    fn item(cost: Option<i64>) -> RepairItem {
        let mut item = RepairItem::new(1, "Screen replacement");
        item.cost = cost;
        item
    }

    fn payment(final_amount: i64) -> Transaction {
        let mut tx = Transaction::new(1, final_amount, 0, PaymentMethod::Cash);
        tx.final_amount = final_amount;
        tx
    }

    #[test]
    fn subtotal_skips_missing_costs() {
        let items = vec![item(Some(100_000)), item(Some(250_000)), item(None)];
        let balance = DeviceBalance::compute(&items, Some(&payment(200_000)));
        assert_eq!(balance.repair_subtotal, 350_000);
        assert_eq!(balance.outstanding_amount, 150_000);
    }

    #[test]
    fn without_payment_everything_is_outstanding() {
        let items = vec![item(Some(100_000)), item(Some(250_000)), item(None)];
        let balance = DeviceBalance::compute(&items, None);
        assert_eq!(balance.outstanding_amount, 350_000);
    }

    #[test]
    fn overpayment_floors_at_zero() {
        let items = vec![item(Some(50_000))];
        let balance = DeviceBalance::compute(&items, Some(&payment(80_000)));
        assert_eq!(balance.outstanding_amount, 0);
    }

    #[test]
    fn empty_device_has_zero_totals() {
        assert_eq!(DeviceBalance::compute(&[], None), DeviceBalance::default());
    }
}
