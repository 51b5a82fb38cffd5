//! Field metadata for the record form: which tab each field lives on,
//! how it is labelled, and how to read/write it on a `VehicleDetails`.

use super::types::VehicleDetails;

/// Form tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTab {
  Vehicle,
  OriginalOwner,
  Sale,
}

impl FormTab {
  pub const ALL: [FormTab; 3] = [FormTab::Vehicle, FormTab::OriginalOwner, FormTab::Sale];

  pub fn label(self) -> &'static str {
    match self {
      FormTab::Vehicle => "Vehicle",
      FormTab::OriginalOwner => "Original owner",
      FormTab::Sale => "Sale / transfer",
    }
  }

  pub fn fields(self) -> &'static [Field] {
    match self {
      FormTab::Vehicle => &[
        Field::Status,
        Field::ImageUrl,
        Field::PurchaseDate,
        Field::Brand,
        Field::ModelType,
        Field::YearModel,
        Field::RegDate,
        Field::RegNumber,
        Field::RegProvince,
        Field::Color,
        Field::ChassisNumber,
        Field::ChassisLocation,
        Field::EngineBrand,
        Field::EngineNumber,
        Field::Cylinders,
        Field::Cc,
      ],
      FormTab::OriginalOwner => &[
        Field::OriginalOwnerName,
        Field::IdCardNumber,
        Field::BirthDate,
        Field::Nationality,
        Field::OriginalOwnerAddress,
      ],
      FormTab::Sale => &[
        Field::SaleDate,
        Field::BuyerName,
        Field::BuyerAddress,
        Field::SalePrice,
        Field::TransferType,
        Field::TransferDetails,
        Field::ReceivedBookDate,
      ],
    }
  }
}

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Text,
  /// ISO date string, may be empty
  Date,
  /// Closed choice, toggled rather than typed
  Choice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Status,
  ImageUrl,
  PurchaseDate,
  Brand,
  ModelType,
  YearModel,
  RegDate,
  RegNumber,
  RegProvince,
  Color,
  ChassisNumber,
  ChassisLocation,
  EngineBrand,
  EngineNumber,
  Cylinders,
  Cc,
  OriginalOwnerName,
  IdCardNumber,
  BirthDate,
  Nationality,
  OriginalOwnerAddress,
  SaleDate,
  BuyerName,
  BuyerAddress,
  SalePrice,
  TransferType,
  TransferDetails,
  ReceivedBookDate,
}

impl Field {
  pub fn label(self) -> &'static str {
    match self {
      Field::Status => "Status",
      Field::ImageUrl => "Image",
      Field::PurchaseDate => "Purchase date",
      Field::Brand => "Brand",
      Field::ModelType => "Model",
      Field::YearModel => "Model year",
      Field::RegDate => "Registration date",
      Field::RegNumber => "Registration no.",
      Field::RegProvince => "Province",
      Field::Color => "Color",
      Field::ChassisNumber => "Chassis no.",
      Field::ChassisLocation => "Chassis location",
      Field::EngineBrand => "Engine brand",
      Field::EngineNumber => "Engine no.",
      Field::Cylinders => "Cylinders",
      Field::Cc => "CC",
      Field::OriginalOwnerName => "Owner name",
      Field::IdCardNumber => "ID card no.",
      Field::BirthDate => "Birth date",
      Field::Nationality => "Nationality",
      Field::OriginalOwnerAddress => "Owner address",
      Field::SaleDate => "Sale date",
      Field::BuyerName => "Buyer name",
      Field::BuyerAddress => "Buyer address",
      Field::SalePrice => "Sale price",
      Field::TransferType => "Transfer",
      Field::TransferDetails => "Transfer details",
      Field::ReceivedBookDate => "Book received",
    }
  }

  pub fn kind(self) -> FieldKind {
    match self {
      Field::Status | Field::TransferType => FieldKind::Choice,
      Field::PurchaseDate
      | Field::RegDate
      | Field::BirthDate
      | Field::SaleDate
      | Field::ReceivedBookDate => FieldKind::Date,
      _ => FieldKind::Text,
    }
  }

  /// Current text of a text/date field. Choice fields have no text.
  pub fn text(self, d: &VehicleDetails) -> Option<&str> {
    let value: &str = match self {
      Field::Status | Field::TransferType => return None,
      Field::ImageUrl => d.image_url.as_deref().unwrap_or(""),
      Field::PurchaseDate => &d.purchase_date,
      Field::Brand => &d.brand,
      Field::ModelType => &d.model_type,
      Field::YearModel => &d.year_model,
      Field::RegDate => &d.reg_date,
      Field::RegNumber => &d.reg_number,
      Field::RegProvince => &d.reg_province,
      Field::Color => &d.color,
      Field::ChassisNumber => &d.chassis_number,
      Field::ChassisLocation => &d.chassis_location,
      Field::EngineBrand => &d.engine_brand,
      Field::EngineNumber => &d.engine_number,
      Field::Cylinders => &d.cylinders,
      Field::Cc => &d.cc,
      Field::OriginalOwnerName => &d.original_owner_name,
      Field::IdCardNumber => &d.id_card_number,
      Field::BirthDate => &d.birth_date,
      Field::Nationality => &d.nationality,
      Field::OriginalOwnerAddress => &d.original_owner_address,
      Field::SaleDate => &d.sale_date,
      Field::BuyerName => &d.buyer_name,
      Field::BuyerAddress => &d.buyer_address,
      Field::SalePrice => &d.sale_price,
      Field::TransferDetails => &d.transfer_details,
      Field::ReceivedBookDate => &d.received_book_date,
    };
    Some(value)
  }

  /// Store text into a text/date field. Ignored for choice fields.
  pub fn set_text(self, d: &mut VehicleDetails, value: String) {
    let slot = match self {
      Field::Status | Field::TransferType => return,
      Field::ImageUrl => {
        d.image_url = (!value.is_empty()).then_some(value);
        return;
      }
      Field::PurchaseDate => &mut d.purchase_date,
      Field::Brand => &mut d.brand,
      Field::ModelType => &mut d.model_type,
      Field::YearModel => &mut d.year_model,
      Field::RegDate => &mut d.reg_date,
      Field::RegNumber => &mut d.reg_number,
      Field::RegProvince => &mut d.reg_province,
      Field::Color => &mut d.color,
      Field::ChassisNumber => &mut d.chassis_number,
      Field::ChassisLocation => &mut d.chassis_location,
      Field::EngineBrand => &mut d.engine_brand,
      Field::EngineNumber => &mut d.engine_number,
      Field::Cylinders => &mut d.cylinders,
      Field::Cc => &mut d.cc,
      Field::OriginalOwnerName => &mut d.original_owner_name,
      Field::IdCardNumber => &mut d.id_card_number,
      Field::BirthDate => &mut d.birth_date,
      Field::Nationality => &mut d.nationality,
      Field::OriginalOwnerAddress => &mut d.original_owner_address,
      Field::SaleDate => &mut d.sale_date,
      Field::BuyerName => &mut d.buyer_name,
      Field::BuyerAddress => &mut d.buyer_address,
      Field::SalePrice => &mut d.sale_price,
      Field::TransferDetails => &mut d.transfer_details,
      Field::ReceivedBookDate => &mut d.received_book_date,
    };
    *slot = value;
  }
}
