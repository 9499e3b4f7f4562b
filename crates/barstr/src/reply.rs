use crate::i18n::Templates;
use crate::types::{Venue, MAX_LISTED_VENUES};

const LIGHTNING_ICON: &str = "⚡";
const ONCHAIN_ICON: &str = "⛓️";

/// What the providers said about a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    PlaceNotFound,
    /// Also what a failed venue request looks like.
    NoVenues,
    Venues(Vec<Venue>),
}

pub fn venue_line(venue: &Venue) -> String {
    let icon = if venue.lightning {
        LIGHTNING_ICON
    } else {
        ONCHAIN_ICON
    };
    format!("{} {} ({})", icon, venue.name, venue.category)
}

/// Renders the reply body. Venues are listed in provider order.
pub fn compose_reply(templates: &Templates, city: &str, lookup: &Lookup) -> String {
    match lookup {
        Lookup::PlaceNotFound => templates.not_found_place(city),
        Lookup::NoVenues => templates.not_found_venues(city),
        Lookup::Venues(venues) if venues.is_empty() => templates.not_found_venues(city),
        Lookup::Venues(venues) => {
            let mut lines = Vec::with_capacity(MAX_LISTED_VENUES + 2);
            lines.push(templates.found_header(city));
            lines.extend(venues.iter().take(MAX_LISTED_VENUES).map(venue_line));
            if venues.len() > MAX_LISTED_VENUES {
                lines.push(templates.overflow(venues.len() - MAX_LISTED_VENUES));
            }
            lines.join("\n")
        }
    }
}
