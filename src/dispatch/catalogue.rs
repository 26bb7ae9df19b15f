//! Fixed reply texts.
//!
//! Keys are matched exactly after normalization. Bodies are sent as-is.

/// Exact greeting phrase.
pub const GREETING: &str = "السلام عليكم ورحمة الله";
pub const GREETING_REPLY: &str = "وعليكم السلام ورحمة الله";

/// Substrings that must all appear for the blessing reply.
pub const BLESSING_TOKENS: &[&str] = &["صلوات", "محمد", "آل"];
pub const BLESSING_REPLY: &str = "اللهم صَلِّ عَلَى مُحَمَّدٍ وَآلِ مُحَمَّدٍ";

/// First token of the audio-only command, e.g. `ترتيل 45`.
pub const RECITATION_KEYWORD: &str = "ترتيل";

/// Synonyms that return the command list.
pub const HELP_KEYS: &[&str] = &["مساعدة", "الأوامر"];

/// Reply to `/start`.
pub const WELCOME: &str = "📖 *تقدمة السيد حيدر الموسوي*\n\
بسم الله الرحمن الرحيم، وبه نستعين.\n\
يسرنا أن نقدم لكم هذا البوت المبارك الذي يتيح لكم تصفح صفحات القرآن الكريم بكل سهولة ويسر.\n\n\
🌙 أرسل رقم الصفحة (من 1 إلى 620) وسأرسل لك صورة الصفحة مباشرة.\n\n\
🎧 أرسل `ترتيل` متبوعة برقم الصفحة (من 1 إلى 604) لتصلك التلاوة فقط.\n\
📚 أرسل `مساعدة` لعرض قائمة الأوامر وأحكام التجويد.";

/// Named tajweed rules, in the order they are listed in the help text.
pub const NAMED_RULES: &[(&str, &str)] = &[
    (
        "الإظهار",
        "*الإظهار الحلقي*\n\
إذا جاء بعد النون الساكنة أو التنوين حرف من حروف الحلق الستة وجب إظهار النون من غير غنة.\n\
الحروف: `ء ه ع ح غ خ`\n\
يجمعها قولهم: أَخِي هَاكَ عِلْمًا حَازَهُ غَيْرُ خَاسِرِ\n\
مثال: `مَنْ آمَنَ` ، `مِنْ عِلْمٍ` ، `عَذَابٌ أَلِيمٌ`",
    ),
    (
        "الإدغام",
        "*الإدغام*\n\
إذا جاء بعد النون الساكنة أو التنوين حرف من حروف كلمة `يرملون` أُدغمت النون فيه.\n\
• *إدغام بغنة*: في حروف `ينمو`، مثال: `مَن يَقُولُ` ، `مِن وَالٍ`\n\
• *إدغام بغير غنة*: في حرفي `ل ر`، مثال: `مِن رَّبِّهِمْ` ، `هُدًى لِّلْمُتَّقِينَ`\n\
ولا إدغام في كلمة واحدة مثل: `دُنْيَا` ، `صِنْوَانٌ`",
    ),
    (
        "الإقلاب",
        "*الإقلاب*\n\
إذا جاء بعد النون الساكنة أو التنوين حرف `ب` قُلبت النون ميمًا مخفاة بغنة بمقدار حركتين.\n\
مثال: `مِنْ بَعْدِ` ، `أَنبِئْهُم` ، `سَمِيعٌ بَصِيرٌ`",
    ),
    (
        "الإخفاء",
        "*الإخفاء الحقيقي*\n\
إذا جاء بعد النون الساكنة أو التنوين حرف من الحروف الخمسة عشر الباقية أُخفيت النون مع الغنة بمقدار حركتين.\n\
الحروف: `ص ذ ث ك ج ش ق س د ط ز ف ت ض ظ`\n\
مثال: `أَنتُمْ` ، `مِن قَبْلِ` ، `رِيحًا صَرْصَرًا`",
    ),
    (
        "الإظهار الشفوي",
        "*الإظهار الشفوي*\n\
إذا جاء بعد الميم الساكنة أي حرف غير `م` و `ب` وجب إظهارها، ويشتد الإظهار عند `و` و `ف` لقرب المخرج.\n\
مثال: `لَهُمْ فِيهَا` ، `عَلَيْهِمْ وَلَا` ، `أَمْ لَمْ`",
    ),
    (
        "الإدغام الشفوي",
        "*الإدغام الشفوي* (إدغام المثلين الصغير)\n\
إذا جاء بعد الميم الساكنة ميم متحركة أُدغمت الأولى في الثانية مع الغنة بمقدار حركتين.\n\
مثال: `لَهُم مَّا يَشَاءُونَ` ، `كُنتُم مُّؤْمِنِينَ`",
    ),
    (
        "الإخفاء الشفوي",
        "*الإخفاء الشفوي*\n\
إذا جاء بعد الميم الساكنة حرف `ب` أُخفيت الميم مع الغنة بمقدار حركتين.\n\
مثال: `تَرْمِيهِم بِحِجَارَةٍ` ، `وَهُم بِالْآخِرَةِ`",
    ),
    (
        "المد الطبيعي",
        "*المد الطبيعي*\n\
هو المد الذي لا تقوم ذات الحرف إلا به، ولا يتوقف على سبب من همز أو سكون. مقداره حركتان.\n\
حروفه: `ا` بعد فتح، `و` ساكنة بعد ضم، `ي` ساكنة بعد كسر.\n\
مثال: `قَالَ` ، `يَقُولُ` ، `قِيلَ`",
    ),
    (
        "المد اللازم",
        "*المد اللازم*\n\
إذا جاء بعد حرف المد سكون أصلي ثابت وصلًا ووقفًا. يُمد ست حركات لزومًا.\n\
أقسامه: كلمي مثقل، كلمي مخفف، حرفي مثقل، حرفي مخفف.\n\
مثال: `الضَّالِّينَ` ، `آلْآنَ` ، `الم`",
    ),
    (
        "المد المتصل",
        "*المد الواجب المتصل*\n\
إذا جاء بعد حرف المد همزة في كلمة واحدة. يُمد أربع أو خمس حركات وجوبًا، وست عند الوقف على الهمزة.\n\
مثال: `جَاءَ` ، `السَّمَاءِ` ، `سُوءَ`",
    ),
    (
        "المد المنفصل",
        "*المد الجائز المنفصل*\n\
إذا كان حرف المد في آخر الكلمة والهمزة في أول الكلمة التي تليها. يجوز فيه القصر حركتان أو التوسط أربع أو خمس حركات.\n\
مثال: `بِمَا أُنزِلَ` ، `قُوا أَنفُسَكُمْ` ، `إِنَّا أَعْطَيْنَاكَ`",
    ),
    (
        "البسملة",
        "*البسملة*\n\
بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ\n\
تُقرأ في أول كل سورة عدا سورة التوبة، ويُستحب الإتيان بها في أثناء السورة.\n\
أوجه الابتداء بها مع الاستعاذة: قطع الجميع، قطع الأول ووصل الثاني بالثالث، وصل الأول بالثاني وقطع الثالث، وصل الجميع.",
    ),
];

/// Full command list: syntax for pages and recitation, then every named
/// rule key, then the help synonyms.
pub fn help_text() -> String {
    let mut text = String::from("📚 *قائمة الأوامر*\n\n");
    text.push_str("📖 أرسل رقم الصفحة من 1 إلى 620، مثال: `45`\n");
    text.push_str("🎧 أرسل `ترتيل` ثم رقم الصفحة من 1 إلى 604، مثال: `ترتيل 45`\n\n");
    text.push_str("*أحكام التجويد*\n");
    for (key, _) in NAMED_RULES {
        text.push_str("• `");
        text.push_str(key);
        text.push_str("`\n");
    }
    text.push_str("\n*المساعدة*\n");
    for key in HELP_KEYS {
        text.push_str("• `");
        text.push_str(key);
        text.push_str("`\n");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_rule_keys_are_unique() {
        let mut keys: Vec<&str> = NAMED_RULES.iter().map(|(k, _)| *k).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), NAMED_RULES.len());
    }

    #[test]
    fn named_rule_keys_are_canonical_and_non_numeric() {
        for (key, _) in NAMED_RULES {
            assert_eq!(*key, key.trim().to_lowercase());
            assert!(!key.chars().all(|c| c.is_numeric()));
        }
    }

    #[test]
    fn catalogue_covers_all_rule_families() {
        assert_eq!(NAMED_RULES.len(), 12);
    }

    #[test]
    fn welcome_opens_with_page_instructions() {
        let opening = "📖 *تقدمة السيد حيدر الموسوي*\n\
بسم الله الرحمن الرحيم، وبه نستعين.\n\
يسرنا أن نقدم لكم هذا البوت المبارك الذي يتيح لكم تصفح صفحات القرآن الكريم بكل سهولة ويسر.\n\n\
🌙 أرسل رقم الصفحة (من 1 إلى 620) وسأرسل لك صورة الصفحة مباشرة.";
        assert!(WELCOME.starts_with(opening));
        assert!(WELCOME.contains(RECITATION_KEYWORD));
        assert!(WELCOME.contains(HELP_KEYS[0]));
    }

    #[test]
    fn help_lists_every_key() {
        let help = help_text();
        for (key, _) in NAMED_RULES {
            assert!(help.contains(key), "help text missing {key}");
        }
        for key in HELP_KEYS {
            assert!(help.contains(key));
        }
        assert!(help.contains(RECITATION_KEYWORD));
    }
}
