pub mod input_field;
pub mod text_edit;
