use crease_models::{Language, ShotLabel};

use super::{BoundaryPools, ShotPools, TemplateTable};

pub static TABLE: TemplateTable = TemplateTable {
    language: Language::Ta,
    default_line: "பேட்ஸ்மேன் கார்டு எடுக்கிறார், மைதானத்தில் பதற்றம் அதிகரிக்கிறது. பார்வையாளர்கள் ஆவலுடன் காத்திருக்கின்றனர்.",
    transitions: &[
        "இதற்கிடையில், ",
        "என்ன அருமையான தருணம்! ",
        "அற்புதமான ஆட்டம்! ",
        "பார்வையாளர்கள் உற்சாகமாக உள்ளனர்! ",
        "நேர்த்தியான ஆட்டம்! ",
    ],
    boundaries: Some(BoundaryPools {
        four: &[
            "பந்து பவுண்டரிக்கு சென்று நான்கு ரன்கள்!",
            "அற்புதமான ஷாட்! பந்து எல்லைக் கோட்டை கடந்து நான்கு ரன்கள்!",
            "நேர்த்தியான ஆட்டம்! பவுண்டரிக்கு நான்கு ரன்கள்!",
        ],
        six: &[
            "அற்புதமான ஷாட்! பந்து மைதானத்தை விட்டு வெளியேறி ஆறு ரன்கள்!",
            "பேட்ஸ்மேனின் சிறந்த ஷாட்! பந்து வானில் பறந்து ஆறு ரன்கள்!",
            "வலுவான ஷாட்! பந்து மைதானத்தை தாண்டி ஆறு ரன்கள்!",
        ],
    }),
    shots: Some(ShotPools {
        generic: &[
            "பேட்ஸ்மேன் நிலையை சரியாக அமைத்து பந்தை ஆடுகிறார்",
            "அழகான பேட்டிங் நுட்பம் காட்டுகிறார்",
            "பந்தை திறமையாக ஆடுகிறார்",
            "சிறப்பான ஷாட் ஆட்டம்!",
        ],
        strokes: &[
            (
                ShotLabel::CoverDrive,
                &[
                    "அழகான கவர் டிரைவ் ஷாட்! திறமையான ஆட்டம்!",
                    "கவர் பகுதியில் அற்புதமான ஷாட்!",
                ],
            ),
            (
                ShotLabel::StraightDrive,
                &[
                    "நேர்கோட்டில் அழகான ஷாட்! மைதானத்தின் நடுவில் செல்கிறது!",
                    "நேரான ஷாட்! பந்து வேகமாக செல்கிறது!",
                ],
            ),
        ],
    }),
    // No Tamil dismissal lines yet.
    wickets: &[],
};
