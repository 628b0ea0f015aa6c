pub mod substation_form;

pub use substation_form::SubstationForm;
