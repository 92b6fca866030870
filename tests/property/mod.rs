mod conversion_properties;
mod layout_properties;
mod selection_properties;
