use serde::{Deserialize, Deserializer, Serialize};

/// Sale status of a vehicle. Serialized with the shop's own labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarStatus {
  #[default]
  #[serde(rename = "พร้อมขาย")]
  Available,
  #[serde(rename = "ขายแล้ว")]
  Sold,
}

impl CarStatus {
  pub fn label(self) -> &'static str {
    match self {
      CarStatus::Available => "Available",
      CarStatus::Sold => "Sold",
    }
  }

  pub fn toggled(self) -> Self {
    match self {
      CarStatus::Available => CarStatus::Sold,
      CarStatus::Sold => CarStatus::Available,
    }
  }
}

/// Who handles the registration transfer after a sale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferType {
  /// Buyer transfers the registration themselves
  #[serde(rename = "โอนเอง")]
  SelfTransfer,
  /// Shop handles the transfer for the buyer
  #[default]
  #[serde(rename = "โอนให้")]
  Shop,
}

impl TransferType {
  pub fn label(self) -> &'static str {
    match self {
      TransferType::SelfTransfer => "Buyer transfers",
      TransferType::Shop => "Shop transfers",
    }
  }

  pub fn toggled(self) -> Self {
    match self {
      TransferType::SelfTransfer => TransferType::Shop,
      TransferType::Shop => TransferType::SelfTransfer,
    }
  }
}

/// Every attribute of a vehicle except its identity and sale status.
///
/// Text columns coming back from the backend may be NULL; those read as
/// empty strings so an empty value is always representable the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleDetails {
  /// Written as null when unset so clearing it reaches the backend
  pub image_url: Option<String>,

  // Vehicle, as bought by the shop
  #[serde(deserialize_with = "null_as_empty")]
  pub purchase_date: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub brand: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub model_type: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub year_model: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub reg_date: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub reg_number: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub reg_province: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub color: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub chassis_number: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub chassis_location: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub engine_brand: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub engine_number: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub cylinders: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub cc: String,

  // Original owner
  #[serde(deserialize_with = "null_as_empty")]
  pub original_owner_name: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub id_card_number: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub birth_date: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub nationality: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub original_owner_address: String,

  // Sale and transfer
  #[serde(deserialize_with = "null_as_empty")]
  pub sale_date: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub buyer_name: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub buyer_address: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub sale_price: String,
  pub transfer_type: TransferType,
  #[serde(deserialize_with = "null_as_empty")]
  pub transfer_details: String,
  #[serde(deserialize_with = "null_as_empty")]
  pub received_book_date: String,
}

impl VehicleDetails {
  /// Blank details for a vehicle the shop just took in.
  pub fn for_new_intake() -> Self {
    Self {
      nationality: "ไทย".to_string(),
      ..Self::default()
    }
  }

  /// "Brand Model", or a placeholder when both are empty
  pub fn title(&self) -> String {
    let title = format!("{} {}", self.brand, self.model_type);
    let title = title.trim();
    if title.is_empty() {
      "(unnamed)".to_string()
    } else {
      title.to_string()
    }
  }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
  }

  Ok(match RawId::deserialize(deserializer)? {
    RawId::Text(id) => id,
    RawId::Signed(id) => id.to_string(),
    RawId::Unsigned(id) => id.to_string(),
  })
}

/// A persisted vehicle record. `id` is assigned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motorcycle {
  /// Opaque key. Integer keys are kept in their decimal form.
  #[serde(deserialize_with = "string_or_number")]
  pub id: String,
  #[serde(default)]
  pub status: CarStatus,
  #[serde(flatten)]
  pub details: VehicleDetails,
  /// Server-managed creation timestamp, carried through untouched
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<String>,
}

/// A vehicle that has not been stored yet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorcycleDraft {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<CarStatus>,
  #[serde(flatten)]
  pub details: VehicleDetails,
}

impl MotorcycleDraft {
  /// Fill in defaults the backend would otherwise leave unset.
  pub fn with_defaults(mut self) -> Self {
    self.status.get_or_insert(CarStatus::Available);
    self
  }
}

/// Which records the list view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
  #[default]
  All,
  Only(CarStatus),
}

impl StatusFilter {
  pub const ALL: [StatusFilter; 3] = [
    StatusFilter::All,
    StatusFilter::Only(CarStatus::Available),
    StatusFilter::Only(CarStatus::Sold),
  ];

  pub fn matches(self, record: &Motorcycle) -> bool {
    match self {
      StatusFilter::All => true,
      StatusFilter::Only(status) => record.status == status,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      StatusFilter::All => "All",
      StatusFilter::Only(status) => status.label(),
    }
  }

  pub fn next(self) -> Self {
    let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
    Self::ALL[(idx + 1) % Self::ALL.len()]
  }

  pub fn count(self, records: &[Motorcycle]) -> usize {
    records.iter().filter(|r| self.matches(r)).count()
  }

  pub fn apply(self, records: &[Motorcycle]) -> Vec<&Motorcycle> {
    records.iter().filter(|r| self.matches(r)).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn record(id: &str, status: CarStatus) -> Motorcycle {
    Motorcycle {
      id: id.to_string(),
      status,
      details: VehicleDetails::default(),
      created_at: None,
    }
  }

  #[test]
  fn test_status_wire_values() {
    assert_eq!(
      serde_json::to_value(CarStatus::Available).unwrap(),
      json!("พร้อมขาย")
    );
    assert_eq!(serde_json::to_value(CarStatus::Sold).unwrap(), json!("ขายแล้ว"));
    assert_eq!(
      serde_json::to_value(TransferType::SelfTransfer).unwrap(),
      json!("โอนเอง")
    );
  }

  #[test]
  fn test_backend_row_with_nulls() {
    let row = json!({
      "id": "42",
      "created_at": "2024-05-01T10:00:00+00:00",
      "status": "ขายแล้ว",
      "brand": "Honda",
      "model_type": null,
      "image_url": null,
      "transfer_type": "โอนเอง"
    });

    let bike: Motorcycle = serde_json::from_value(row).unwrap();
    assert_eq!(bike.id, "42");
    assert_eq!(bike.status, CarStatus::Sold);
    assert_eq!(bike.details.brand, "Honda");
    assert_eq!(bike.details.model_type, "");
    assert_eq!(bike.details.image_url, None);
    assert_eq!(bike.details.transfer_type, TransferType::SelfTransfer);
    assert_eq!(bike.created_at.as_deref(), Some("2024-05-01T10:00:00+00:00"));
  }

  #[test]
  fn test_integer_primary_key() {
    let rows = r#"[
      {"id": 42, "status": "พร้อมขาย", "brand": "Honda"},
      {"id": "a1b2", "status": "ขายแล้ว", "brand": "Yamaha"}
    ]"#;

    let bikes: Vec<Motorcycle> = serde_json::from_str(rows).unwrap();
    assert_eq!(bikes[0].id, "42");
    assert_eq!(bikes[0].details.brand, "Honda");
    assert_eq!(bikes[1].id, "a1b2");

    // Snapshots store the normalized form and read back unchanged
    let snapshot = serde_json::to_string(&bikes).unwrap();
    let restored: Vec<Motorcycle> = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(restored, bikes);
  }

  #[test]
  fn test_draft_omits_unset_status() {
    let draft = MotorcycleDraft {
      status: None,
      details: VehicleDetails {
        brand: "Yamaha".to_string(),
        ..VehicleDetails::default()
      },
    };

    let value = serde_json::to_value(&draft).unwrap();
    assert!(value.get("status").is_none());
    assert!(value.get("id").is_none());
    assert_eq!(value["brand"], "Yamaha");
  }

  #[test]
  fn test_draft_defaults_status() {
    let draft = MotorcycleDraft::default().with_defaults();
    assert_eq!(draft.status, Some(CarStatus::Available));

    let sold = MotorcycleDraft {
      status: Some(CarStatus::Sold),
      ..MotorcycleDraft::default()
    }
    .with_defaults();
    assert_eq!(sold.status, Some(CarStatus::Sold));
  }

  #[test]
  fn test_new_intake_defaults() {
    let details = VehicleDetails::for_new_intake();
    assert_eq!(details.nationality, "ไทย");
    assert_eq!(details.transfer_type, TransferType::Shop);
    assert_eq!(details.brand, "");
  }

  #[test]
  fn test_status_filter() {
    let records = vec![
      record("1", CarStatus::Available),
      record("2", CarStatus::Sold),
      record("3", CarStatus::Available),
    ];

    assert_eq!(StatusFilter::All.count(&records), 3);
    assert_eq!(StatusFilter::Only(CarStatus::Available).count(&records), 2);

    let sold = StatusFilter::Only(CarStatus::Sold).apply(&records);
    assert_eq!(sold.len(), 1);
    assert_eq!(sold[0].id, "2");
  }

  #[test]
  fn test_status_filter_cycles() {
    let mut filter = StatusFilter::All;
    for _ in 0..StatusFilter::ALL.len() {
      filter = filter.next();
    }
    assert_eq!(filter, StatusFilter::All);
  }

  #[test]
  fn test_title_placeholder() {
    assert_eq!(VehicleDetails::default().title(), "(unnamed)");
    let details = VehicleDetails {
      brand: "Honda".to_string(),
      ..VehicleDetails::default()
    };
    assert_eq!(details.title(), "Honda");
  }
}
