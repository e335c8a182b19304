pub mod family_case;
