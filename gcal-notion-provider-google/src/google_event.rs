pub mod from_google;
