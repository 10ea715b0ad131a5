use super::TextKey;
use super::TextKey::*;
use crate::language::Language;

pub(super) fn entries(language: Language) -> &'static [(TextKey, &'static str)] {
    match language {
        Language::English => ENGLISH,
        Language::Telugu => TELUGU,
        Language::Hindi => HINDI,
    }
}

const ENGLISH: &[(TextKey, &str)] = &[
    (ChatbotName, "Rythu Mitra AI"),
    (
        ChatbotInitialMessage,
        "Namaste! I am Rythu Mitra, your farming assistant. Ask me about crops, pests, weather or government schemes.",
    ),
    (ChatbotQuickQuestions, "Quick questions:"),
    (ChatbotSuggestedQuestion1, "What is the best time to sow cotton?"),
    (ChatbotSuggestedQuestion2, "How do I control pink bollworm in cotton?"),
    (ChatbotSuggestedQuestion3, "Tell me about the Rythu Bandhu scheme."),
    (InputPlaceholder, "Type your question..."),
    (SendMessage, "Send"),
    (SearchSources, "Sources:"),
    (
        ErrorFetchingResponse,
        "Sorry, I could not get a response right now. Please try again.",
    ),
    (ApiKeyNotConfigured, "API Key not configured. Please contact support."),
    (ApiKeyInvalid, "API Key is not valid. Please check your configuration."),
    (RequestInFlight, "Please wait for the current answer."),
    (LanguageChanged, "Language switched to {0}."),
    (VoiceInput, "Voice input"),
    (Listening, "Listening..."),
    (VoiceUnsupported, "Speech recognition is not supported on this device."),
    (VoiceStartFailed, "Could not start recognition: {0}"),
    (VoiceRecognitionError, "Speech recognition error: {0}"),
    (MandiRates, "Mandi Rates"),
    (MyCrops, "My Crops"),
    (All, "All"),
    (Grains, "Grains"),
    (Vegetables, "Vegetables"),
    (Pulses, "Pulses"),
    (Other, "Other"),
    (TrendUp, "Rising"),
    (TrendDown, "Falling"),
    (TrendStable, "Stable"),
    (Cotton, "Cotton"),
    (Paddy, "Paddy"),
    (Turmeric, "Turmeric"),
    (Maize, "Maize"),
    (RedGram, "Red Gram"),
    (Tomato, "Tomato"),
    (Soybean, "Soybean"),
    (Chilli, "Chilli"),
    (NizamabadMarket, "Nizamabad Market"),
    (KarimnagarMarket, "Karimnagar Market"),
    (WarangalMarket, "Warangal Market"),
    (AdilabadMarket, "Adilabad Market"),
    (HyderabadMarket, "Hyderabad Market"),
    (CropGuide, "Crop Guide"),
    (Kharif, "Kharif"),
    (Rabi, "Rabi"),
    (SowingJuneJuly, "June - July"),
    (SowingOctNov, "October - November"),
    (Duration100Days, "90-100 days"),
    (Duration120Days, "120-130 days"),
    (Duration150Days, "150-180 days"),
    (AiHighlySuitable, "Highly suitable for your soil"),
    (AiSuitable, "Suitable for your soil"),
    (WeatherTitle, "Weather"),
    (Forecast, "3-day forecast"),
    (Today, "Today"),
    (Tomorrow, "Tomorrow"),
    (DayAfterTomorrow, "Day after tomorrow"),
    (Sunny, "Sunny"),
    (PartlyCloudy, "Partly cloudy"),
    (Cloudy, "Cloudy"),
    (RainExpected, "Rain expected"),
    (MyCropAlertTitle, "My crop alert"),
    (MarketReport, "Market report"),
    (AiTipTitle, "AI tip of the day"),
    (TipCottonPinkBollwormTitle, "Watch for pink bollworm in cotton"),
    (
        TipCottonPinkBollwormContent,
        "Set up pheromone traps (5 per acre) at flowering and check bolls weekly. Remove and destroy damaged bolls and rosette flowers.",
    ),
];

const TELUGU: &[(TextKey, &str)] = &[
    (ChatbotName, "రైతు మిత్ర AI"),
    (
        ChatbotInitialMessage,
        "నమస్కారం! నేను రైతు మిత్ర, మీ వ్యవసాయ సహాయకుడిని. పంటలు, తెగుళ్లు, వాతావరణం లేదా ప్రభుత్వ పథకాల గురించి నన్ను అడగండి.",
    ),
    (ChatbotQuickQuestions, "త్వరిత ప్రశ్నలు:"),
    (ChatbotSuggestedQuestion1, "పత్తి విత్తడానికి సరైన సమయం ఏది?"),
    (ChatbotSuggestedQuestion2, "పత్తిలో గులాబీ రంగు పురుగును ఎలా నియంత్రించాలి?"),
    (ChatbotSuggestedQuestion3, "రైతు బంధు పథకం గురించి చెప్పండి."),
    (InputPlaceholder, "మీ ప్రశ్నను టైప్ చేయండి..."),
    (SendMessage, "పంపు"),
    (SearchSources, "మూలాలు:"),
    (
        ErrorFetchingResponse,
        "క్షమించండి, ప్రస్తుతం సమాధానం పొందలేకపోయాను. దయచేసి మళ్ళీ ప్రయత్నించండి.",
    ),
    (ApiKeyNotConfigured, "API కీ కాన్ఫిగర్ చేయబడలేదు. దయచేసి సహాయాన్ని సంప్రదించండి."),
    (ApiKeyInvalid, "API కీ చెల్లదు. దయచేసి మీ కాన్ఫిగరేషన్‌ను తనిఖీ చేయండి."),
    (RequestInFlight, "దయచేసి ప్రస్తుత సమాధానం కోసం వేచి ఉండండి."),
    (LanguageChanged, "భాష {0}కి మార్చబడింది."),
    (VoiceInput, "వాయిస్ ఇన్‌పుట్"),
    (Listening, "వింటున్నాను..."),
    (VoiceUnsupported, "ఈ పరికరంలో వాయిస్ గుర్తింపు అందుబాటులో లేదు."),
    (VoiceStartFailed, "గుర్తింపును ప్రారంభించలేకపోయాము: {0}"),
    (VoiceRecognitionError, "వాయిస్ గుర్తింపు లోపం: {0}"),
    (MandiRates, "మండి ధరలు"),
    (MyCrops, "నా పంటలు"),
    (All, "అన్నీ"),
    (Grains, "ధాన్యాలు"),
    (Vegetables, "కూరగాయలు"),
    (Pulses, "పప్పుధాన్యాలు"),
    (Other, "ఇతర"),
    (TrendUp, "పెరుగుతోంది"),
    (TrendDown, "తగ్గుతోంది"),
    (TrendStable, "స్థిరంగా"),
    (Cotton, "పత్తి"),
    (Paddy, "వరి"),
    (Turmeric, "పసుపు"),
    (Maize, "మొక్కజొన్న"),
    (RedGram, "కంది"),
    (Tomato, "టమాటా"),
    (Soybean, "సోయాబీన్"),
    (Chilli, "మిరప"),
    (NizamabadMarket, "నిజామాబాద్ మార్కెట్"),
    (KarimnagarMarket, "కరీంనగర్ మార్కెట్"),
    (WarangalMarket, "వరంగల్ మార్కెట్"),
    (AdilabadMarket, "ఆదిలాబాద్ మార్కెట్"),
    (HyderabadMarket, "హైదరాబాద్ మార్కెట్"),
    (CropGuide, "పంట మార్గదర్శి"),
    (Kharif, "వానాకాలం"),
    (Rabi, "యాసంగి"),
    (SowingJuneJuly, "జూన్ - జులై"),
    (SowingOctNov, "అక్టోబర్ - నవంబర్"),
    (Duration100Days, "90-100 రోజులు"),
    (Duration120Days, "120-130 రోజులు"),
    (Duration150Days, "150-180 రోజులు"),
    (AiHighlySuitable, "మీ నేలకు చాలా అనుకూలం"),
    (AiSuitable, "మీ నేలకు అనుకూలం"),
    (WeatherTitle, "వాతావరణం"),
    (Forecast, "3 రోజుల సూచన"),
    (Today, "ఈరోజు"),
    (Tomorrow, "రేపు"),
    (DayAfterTomorrow, "ఎల్లుండి"),
    (Sunny, "ఎండగా"),
    (PartlyCloudy, "పాక్షికంగా మేఘావృతం"),
    (Cloudy, "మేఘావృతం"),
    (RainExpected, "వర్షం సూచన"),
    (MyCropAlertTitle, "నా పంట హెచ్చరిక"),
    (MarketReport, "మార్కెట్ నివేదిక"),
    (AiTipTitle, "నేటి AI సలహా"),
    (TipCottonPinkBollwormTitle, "పత్తిలో గులాబీ రంగు పురుగు పట్ల జాగ్రత్త"),
    (
        TipCottonPinkBollwormContent,
        "పూత దశలో ఎకరానికి 5 లింగాకర్షక బుట్టలు అమర్చి, ప్రతి వారం కాయలను పరిశీలించండి. దెబ్బతిన్న కాయలు, గులాబీ పూలను తీసి నాశనం చేయండి.",
    ),
];

// Hindi was added later and is still partial; missing keys fall back to English.
const HINDI: &[(TextKey, &str)] = &[
    (ChatbotName, "रैतु मित्र AI"),
    (
        ChatbotInitialMessage,
        "नमस्ते! मैं रैतु मित्र हूँ, आपका कृषि सहायक। फसलों, कीटों, मौसम या सरकारी योजनाओं के बारे में मुझसे पूछें।",
    ),
    (ChatbotQuickQuestions, "त्वरित प्रश्न:"),
    (ChatbotSuggestedQuestion1, "कपास बोने का सबसे अच्छा समय क्या है?"),
    (ChatbotSuggestedQuestion2, "कपास में गुलाबी सुंडी को कैसे नियंत्रित करें?"),
    (ChatbotSuggestedQuestion3, "रायथु बंधु योजना के बारे में बताइए।"),
    (InputPlaceholder, "अपना प्रश्न लिखें..."),
    (SendMessage, "भेजें"),
    (SearchSources, "स्रोत:"),
    (
        ErrorFetchingResponse,
        "क्षमा करें, अभी उत्तर नहीं मिल सका। कृपया फिर से प्रयास करें।",
    ),
    (ApiKeyNotConfigured, "API कुंजी कॉन्फ़िगर नहीं है। कृपया सहायता से संपर्क करें।"),
    (LanguageChanged, "भाषा {0} में बदल दी गई।"),
    (VoiceInput, "आवाज़ इनपुट"),
    (Listening, "सुन रहा हूँ..."),
    (VoiceUnsupported, "इस डिवाइस पर वाक् पहचान उपलब्ध नहीं है।"),
    (VoiceRecognitionError, "वाक् पहचान त्रुटि: {0}"),
    (MandiRates, "मंडी भाव"),
    (MyCrops, "मेरी फसलें"),
    (All, "सभी"),
    (Grains, "अनाज"),
    (Vegetables, "सब्ज़ियाँ"),
    (Pulses, "दालें"),
    (Other, "अन्य"),
    (Cotton, "कपास"),
    (Paddy, "धान"),
    (Turmeric, "हल्दी"),
    (Maize, "मक्का"),
    (RedGram, "अरहर"),
    (Tomato, "टमाटर"),
    (Soybean, "सोयाबीन"),
    (Chilli, "मिर्च"),
    (NizamabadMarket, "निजामाबाद बाजार"),
    (KarimnagarMarket, "करीमनगर बाजार"),
    (WarangalMarket, "वारंगल बाजार"),
    (AdilabadMarket, "आदिलाबाद बाजार"),
    (HyderabadMarket, "हैदराबाद बाजार"),
    (CropGuide, "फसल मार्गदर्शिका"),
    (Kharif, "खरीफ"),
    (Rabi, "रबी"),
    (SowingJuneJuly, "जून - जुलाई"),
    (SowingOctNov, "अक्टूबर - नवंबर"),
    (Duration100Days, "90-100 दिन"),
    (Duration120Days, "120-130 दिन"),
    (Duration150Days, "150-180 दिन"),
    (AiHighlySuitable, "आपकी मिट्टी के लिए अत्यधिक उपयुक्त"),
    (AiSuitable, "आपकी मिट्टी के लिए उपयुक्त"),
    (WeatherTitle, "मौसम"),
    (Today, "आज"),
    (Tomorrow, "कल"),
    (Sunny, "धूप"),
    (RainExpected, "बारिश की संभावना"),
    (MyCropAlertTitle, "मेरी फसल अलर्ट"),
];
