use crease_models::Language;

use super::TemplateTable;

pub static TABLE: TemplateTable = TemplateTable {
    language: Language::Hi,
    default_line: "बल्लेबाज गार्ड लेते हैं और स्टेडियम में तनाव बढ़ता है। दर्शक उत्सुकता से प्रतीक्षा करते हैं।",
    transitions: &["इस बीच, ", "क्या पल है! ", "अद्भुत प्रदर्शन! ", "दर्शक उत्साहित हैं जब "],
    boundaries: None,
    shots: None,
    wickets: &[],
};
