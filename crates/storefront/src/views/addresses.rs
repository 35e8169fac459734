//! Address book cards.

use shopfront_core::AddressId;

use super::ListView;
use crate::api::Address;
use crate::store::StoreState;

/// One address card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressCard {
    pub id: AddressId,
    pub title: String,
    pub lines: Vec<String>,
    pub phone: Option<String>,
    pub is_default: bool,
    pub is_selected: bool,
}

impl AddressCard {
    #[must_use]
    pub fn new(address: &Address, selected: Option<&AddressId>) -> Self {
        let mut lines = vec![address.address_line1.clone()];
        if let Some(line2) = address
            .address_line2
            .as_deref()
            .filter(|l| !l.trim().is_empty())
        {
            lines.push(line2.to_string());
        }

        let locality = match address.state.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(state) => format!("{}, {state} {}", address.city, address.postal_code),
            None => format!("{} {}", address.city, address.postal_code),
        };
        lines.push(locality);
        lines.push(address.country.clone());

        Self {
            id: address.id.clone(),
            title: address.full_name.clone(),
            lines,
            phone: address.phone.clone(),
            is_default: address.is_default,
            is_selected: selected == Some(&address.id),
        }
    }

    /// Badges shown next to the title.
    #[must_use]
    pub fn badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::new();
        if self.is_selected {
            badges.push("selected");
        }
        if self.is_default {
            badges.push("default");
        }
        badges
    }
}

/// The address book page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBookView {
    pub view: ListView<AddressCard>,
}

impl AddressBookView {
    #[must_use]
    pub fn build(state: &StoreState<Address>) -> Self {
        let selected = state.selected();
        Self {
            view: ListView::build(state, |_| true, |address| AddressCard::new(address, selected)),
        }
    }

    /// The card for the selected address, if it is in the list.
    #[must_use]
    pub fn selected(&self) -> Option<&AddressCard> {
        self.view.rows().iter().find(|card| card.is_selected)
    }
}
