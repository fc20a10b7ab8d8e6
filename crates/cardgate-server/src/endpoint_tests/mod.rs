mod deals;
mod helpers;
mod methods;
