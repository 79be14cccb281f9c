//! CSV rendering for the export endpoint.

use crate::domain::contact::Contact;

/// Encodes the contact set as a CSV document with the fixed header
/// `ID,Name,Image,Phone Numbers`, one row per contact. Fields containing a
/// comma or quote are escaped per standard CSV quoting; a missing image
/// renders as an empty field.
pub fn render_csv(contacts: &[Contact]) -> Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);

        writer.write_record(["ID", "Name", "Image", "Phone Numbers"])?;
        for contact in contacts {
            writer.write_record([
                contact.id.to_string().as_str(),
                contact.name.as_str(),
                contact.image.as_deref().unwrap_or(""),
                contact.phone_numbers.as_str(),
            ])?;
        }
        writer.flush()?;
    }
    Ok(buf)
}
