//! Shared constants used across the application

/// Base URL used when neither the command line, the environment nor the
/// config file names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Environment variable consulted for the backend base URL.
pub const BASE_URL_ENV: &str = "KWEBBEL_BASE_URL";

/// Returned by the session controller when `/send-message` fails.
pub const SEND_FALLBACK: &str =
    "Sorry, er is een fout opgetreden bij het verzenden van uw bericht.";

/// Returned by the session controller when `/start-conversation` fails, and
/// shown by the view if the start task itself dies.
pub const START_FALLBACK: &str =
    "Sorry, er is een fout opgetreden bij het starten van een nieuwe conversatie.";

/// Shown by the view when a send task dies before producing a reply.
pub const VIEW_SEND_FALLBACK: &str = "Sorry, er is een fout opgetreden.";

pub const WIDGET_TITLE: &str = "UWV Chatbot";
pub const INPUT_PLACEHOLDER: &str = "Typ uw vraag hier...";
pub const MODEL_PLACEHOLDER: &str = "Selecteer model";
pub const NEW_CONVERSATION_LABEL: &str = "Nieuwe conversatie";
pub const CLEAR_MEMORY_LABEL: &str = "Wis geheugen";
