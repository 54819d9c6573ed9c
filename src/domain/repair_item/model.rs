//! Repair item entity and catalog defaulting

use chrono::{DateTime, Utc};

use crate::domain::service_catalog::ServiceCatalog;
use crate::domain::{DomainError, DomainResult};

/// One billable line of work
#[derive(Debug, Clone, PartialEq)]
pub struct RepairItem {
    pub id: i32,
    pub device_id: i32,
    pub repair_session_id: Option<i32>,
    pub service_catalog_id: Option<i32>,
    pub service_name: String,
    pub part_used: Option<String>,
    /// Price in the smallest currency unit; required on every write path
    pub cost: Option<i64>,
    pub warranty_months: Option<i32>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RepairItem {
    pub fn new(device_id: i32, service_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            device_id,
            repair_session_id: None,
            service_catalog_id: None,
            service_name: service_name.into(),
            part_used: None,
            cost: None,
            warranty_months: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Caller-supplied fields of a repair item before catalog defaulting.
///
/// The catalog name always replaces `service_name`. The other catalog values
/// only fill fields the caller left blank. Items are a point-in-time copy:
/// later catalog edits do not touch them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairItemDraft {
    pub service_name: Option<String>,
    pub part_used: Option<String>,
    pub cost: Option<i64>,
    pub warranty_months: Option<i32>,
    pub description: Option<String>,
}

impl RepairItemDraft {
    pub fn apply_catalog(mut self, catalog: &ServiceCatalog) -> Self {
        self.service_name = Some(catalog.name.clone());
        if is_blank(&self.part_used) {
            self.part_used = catalog.default_part_used.clone();
        }
        if self.cost.is_none() {
            self.cost = Some(catalog.base_cost);
        }
        if self.warranty_months.is_none() {
            self.warranty_months = catalog.default_warranty_months;
        }
        self
    }

    /// Fields still blank fall back to the values stored on `item`
    pub fn or_stored(self, item: &RepairItem) -> Self {
        Self {
            service_name: self
                .service_name
                .or_else(|| Some(item.service_name.clone())),
            part_used: self.part_used.or_else(|| item.part_used.clone()),
            cost: self.cost.or(item.cost),
            warranty_months: self.warranty_months.or(item.warranty_months),
            description: self.description.or_else(|| item.description.clone()),
        }
    }

    /// Copy the draft onto `item`, failing if the service name or cost is still missing.
    pub fn fill(self, item: &mut RepairItem) -> DomainResult<()> {
        let service_name = self
            .service_name
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| DomainError::missing_field("serviceName"))?;
        let cost = self.cost.ok_or_else(|| DomainError::missing_field("cost"))?;
        if cost < 0 {
            return Err(DomainError::Validation("cost must not be negative".into()));
        }

        item.service_name = service_name;
        item.part_used = self.part_used.filter(|p| !p.trim().is_empty());
        item.cost = Some(cost);
        item.warranty_months = self.warranty_months;
        item.description = self.description;
        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ServiceCatalog {
        let mut c = ServiceCatalog::new("Battery replacement", 450_000);
        c.id = 7;
        c.default_part_used = Some("OEM battery".into());
        c.default_warranty_months = Some(6);
        c
    }

    #[test]
    fn blank_cost_takes_catalog_base_cost() {
        let draft = RepairItemDraft::default().apply_catalog(&catalog());
        let mut item = RepairItem::new(1, "");
        draft.fill(&mut item).unwrap();
        assert_eq!(item.cost, Some(450_000));
        assert_eq!(item.part_used.as_deref(), Some("OEM battery"));
        assert_eq!(item.warranty_months, Some(6));
    }

    #[test]
    fn caller_values_win_over_catalog_defaults() {
        let draft = RepairItemDraft {
            service_name: Some("my label".into()),
            part_used: Some("Aftermarket cell".into()),
            cost: Some(300_000),
            warranty_months: Some(3),
            description: None,
        }
        .apply_catalog(&catalog());
        let mut item = RepairItem::new(1, "");
        draft.fill(&mut item).unwrap();

        assert_eq!(item.cost, Some(300_000));
        assert_eq!(item.part_used.as_deref(), Some("Aftermarket cell"));
        assert_eq!(item.warranty_months, Some(3));
        // the catalog label is authoritative
        assert_eq!(item.service_name, "Battery replacement");
    }

    #[test]
    fn whitespace_part_is_treated_as_blank() {
        let draft = RepairItemDraft {
            part_used: Some("   ".into()),
            ..Default::default()
        }
        .apply_catalog(&catalog());
        assert_eq!(draft.part_used.as_deref(), Some("OEM battery"));
    }

    #[test]
    fn missing_cost_without_catalog_is_rejected() {
        let draft = RepairItemDraft {
            service_name: Some("Diagnostics".into()),
            ..Default::default()
        };
        let mut item = RepairItem::new(1, "");
        let err = draft.fill(&mut item).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("cost")));
    }

    #[test]
    fn blank_service_name_is_rejected() {
        let draft = RepairItemDraft {
            service_name: Some("  ".into()),
            cost: Some(10),
            ..Default::default()
        };
        let mut item = RepairItem::new(1, "");
        let err = draft.fill(&mut item).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("serviceName")));
    }
}
