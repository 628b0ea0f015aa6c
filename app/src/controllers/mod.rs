pub mod substation;
